//! Writes a deterministic sample dataset to `assets/data/emissions.json`
//! and `assets/data/emissions.csv` for manual testing of the dashboard.

use std::io::Write;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[derive(serde::Serialize)]
struct SampleRecord {
    year: i32,
    emissions: f64,
    emission_type: &'static str,
    country: &'static str,
    activity: &'static str,
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let countries = ["Spain", "France", "Germany", "Italy", "Poland", "Sweden"];
    let activities = ["Energy", "Transport", "Agriculture", "Industry", "Waste"];
    // Mostly the three known gases, plus an occasional tag the charts don't
    // break out individually.
    let types = ["CO2", "CO2", "CO2", "CH4", "CH4", "N2O", "SF6"];

    // Rough per-activity emission scale in megatonnes.
    let scale = |activity: &str| -> f64 {
        match activity {
            "Energy" => 8.0,
            "Transport" => 5.0,
            "Industry" => 4.0,
            "Agriculture" => 3.0,
            _ => 1.5,
        }
    };

    let mut records = Vec::new();
    for year in 2015..=2023 {
        for country in countries {
            for activity in activities {
                let emission_type = types[(rng.next_u64() % types.len() as u64) as usize];
                let base = scale(activity);
                let emissions = (base * (0.4 + rng.next_f64()) * 100.0).round() / 100.0;
                records.push(SampleRecord {
                    year,
                    emissions,
                    emission_type,
                    country,
                    activity,
                });
            }
        }
    }

    std::fs::create_dir_all("assets/data").expect("Failed to create assets/data");

    let json = serde_json::to_string_pretty(&records).expect("Failed to serialize JSON");
    std::fs::write("assets/data/emissions.json", json).expect("Failed to write JSON");

    let mut csv = std::fs::File::create("assets/data/emissions.csv")
        .expect("Failed to create CSV file");
    writeln!(csv, "year,emissions,emission_type,country,activity").unwrap();
    for rec in &records {
        writeln!(
            csv,
            "{},{},{},{},{}",
            rec.year, rec.emissions, rec.emission_type, rec.country, rec.activity
        )
        .unwrap();
    }

    println!(
        "Wrote {} emission records to assets/data/emissions.{{json,csv}}",
        records.len()
    );
}
