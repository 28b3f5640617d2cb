use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use thiserror::Error;

use super::model::EmissionRecord;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
#[error("Unsupported file extension: .{0}")]
pub struct UnsupportedExtension(String);

/// Load emission records from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.json` – array of record objects, the dashboard's native export shape
/// * `.csv`  – header `year,emissions,emission_type,country,activity`
pub fn load_file(path: &Path) -> Result<Vec<EmissionRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => return Err(UnsupportedExtension(other.to_string()).into()),
    };

    info!("loaded {} emission records from {}", records.len(), path.display());
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "year": 2020,
///     "emissions": 5.5,
///     "emission_type": "CO2",
///     "country": "Spain",
///     "activity": "Energy"
///   },
///   ...
/// ]
/// ```
///
/// Unknown `emission_type` tags are accepted as-is; they simply get no
/// dedicated chart series.
fn load_json(path: &Path) -> Result<Vec<EmissionRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<EmissionRecord> =
        serde_json::from_str(&text).context("parsing JSON records")?;
    Ok(records)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the record field names, one record per row.
fn load_csv(path: &Path) -> Result<Vec<EmissionRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<EmissionRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::EmissionType;

    #[test]
    fn rejects_unknown_extensions() {
        let err = load_file(Path::new("data.parquet")).unwrap_err();
        assert!(err.to_string().contains("parquet"));
    }

    #[test]
    fn loads_json_records() {
        let dir = std::env::temp_dir();
        let path = dir.join("emission_dashboard_loader_test.json");
        std::fs::write(
            &path,
            r#"[
                {"year": 2020, "emissions": 5.5, "emission_type": "CO2",
                 "country": "Spain", "activity": "Energy"},
                {"year": 2021, "emissions": 1.1, "emission_type": "SF6",
                 "country": "France", "activity": "Industry"}
            ]"#,
        )
        .unwrap();

        let records = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].country, "Spain");
        assert_eq!(
            records[1].emission_type,
            EmissionType::Other("SF6".to_string())
        );
    }

    #[test]
    fn loads_csv_records() {
        let dir = std::env::temp_dir();
        let path = dir.join("emission_dashboard_loader_test.csv");
        std::fs::write(
            &path,
            "year,emissions,emission_type,country,activity\n\
             2020,5.5,CO2,Spain,Energy\n\
             2021,3.2,CH4,France,Agriculture\n",
        )
        .unwrap();

        let records = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].emission_type, EmissionType::Ch4);
        assert_eq!(records[1].emissions, 3.2);
    }
}
