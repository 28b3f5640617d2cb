use super::model::{EmissionRecord, FilterCriteria};

// ---------------------------------------------------------------------------
// Filter engine: criteria → filtered record set
// ---------------------------------------------------------------------------

/// Return the records passing every active constraint in `criteria`.
///
/// A record passes when:
/// * Each selection list is empty (no constraint) or contains the record's value
/// * `year_range` is unset or `min ≤ year ≤ max` (inclusive)
/// * `min_emissions` / `max_emissions` are unset or satisfied inclusively
///
/// Pure and order-preserving: the output is a subsequence of `records`.
pub fn apply_filters(records: &[EmissionRecord], criteria: &FilterCriteria) -> Vec<EmissionRecord> {
    records
        .iter()
        .filter(|rec| matches_criteria(rec, criteria))
        .cloned()
        .collect()
}

fn matches_criteria(rec: &EmissionRecord, criteria: &FilterCriteria) -> bool {
    if !criteria.countries.is_empty() && !criteria.countries.contains(&rec.country) {
        return false;
    }
    if !criteria.emission_types.is_empty() && !criteria.emission_types.contains(&rec.emission_type)
    {
        return false;
    }
    if !criteria.activities.is_empty() && !criteria.activities.contains(&rec.activity) {
        return false;
    }
    if let Some((min, max)) = criteria.year_range {
        if rec.year < min || rec.year > max {
            return false;
        }
    }
    if let Some(min) = criteria.min_emissions {
        if rec.emissions < min {
            return false;
        }
    }
    if let Some(max) = criteria.max_emissions {
        if rec.emissions > max {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::EmissionType;

    fn sample_records() -> Vec<EmissionRecord> {
        vec![
            record("Spain", 2020, EmissionType::Co2, "Energy", 5.5),
            record("France", 2020, EmissionType::Ch4, "Agriculture", 3.2),
            record("Spain", 2021, EmissionType::Co2, "Transport", 4.8),
            record("Germany", 2020, EmissionType::N2o, "Energy", 6.1),
        ]
    }

    fn record(
        country: &str,
        year: i32,
        emission_type: EmissionType,
        activity: &str,
        emissions: f64,
    ) -> EmissionRecord {
        EmissionRecord {
            year,
            emissions,
            emission_type,
            country: country.to_string(),
            activity: activity.to_string(),
        }
    }

    #[test]
    fn empty_criteria_is_identity() {
        let records = sample_records();
        let out = apply_filters(&records, &FilterCriteria::default());
        assert_eq!(out, records);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let out = apply_filters(&[], &FilterCriteria::default());
        assert!(out.is_empty());
    }

    #[test]
    fn filters_by_country() {
        let criteria = FilterCriteria {
            countries: vec!["Spain".to_string()],
            ..FilterCriteria::default()
        };
        let out = apply_filters(&sample_records(), &criteria);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.country == "Spain"));
    }

    #[test]
    fn filters_by_year_range_inclusive() {
        let criteria = FilterCriteria {
            year_range: Some((2021, 2021)),
            ..FilterCriteria::default()
        };
        let out = apply_filters(&sample_records(), &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "Spain");
        assert_eq!(out[0].year, 2021);
        assert_eq!(out[0].activity, "Transport");
    }

    #[test]
    fn filters_by_emission_type() {
        let criteria = FilterCriteria {
            emission_types: vec![EmissionType::Co2],
            ..FilterCriteria::default()
        };
        let out = apply_filters(&sample_records(), &criteria);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.emission_type == EmissionType::Co2));
    }

    #[test]
    fn filters_by_emission_bounds() {
        let criteria = FilterCriteria {
            min_emissions: Some(4.8),
            max_emissions: Some(5.5),
            ..FilterCriteria::default()
        };
        let out = apply_filters(&sample_records(), &criteria);
        // Bounds are inclusive on both ends.
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].emissions, 5.5);
        assert_eq!(out[1].emissions, 4.8);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let criteria = FilterCriteria {
            countries: vec!["Spain".to_string()],
            activities: vec!["Energy".to_string()],
            ..FilterCriteria::default()
        };
        let out = apply_filters(&sample_records(), &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].activity, "Energy");
    }

    #[test]
    fn output_preserves_input_order() {
        let records = sample_records();
        let criteria = FilterCriteria {
            year_range: Some((2020, 2020)),
            ..FilterCriteria::default()
        };
        let out = apply_filters(&records, &criteria);
        let countries: Vec<&str> = out.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, ["Spain", "France", "Germany"]);
    }
}
