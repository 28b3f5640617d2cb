use std::collections::{BTreeMap, BTreeSet};

use super::model::{AggregatedData, EmissionRecord, EmissionType, FacetMetadata, YearPoint};

// ---------------------------------------------------------------------------
// Aggregation engine: filtered records → summary statistics
// ---------------------------------------------------------------------------

/// Compute summary statistics over `records` (normally the filtered set).
///
/// All outputs for an empty input are well defined: zero totals, no max
/// record, empty maps, empty series.
pub fn aggregate(records: &[EmissionRecord]) -> AggregatedData {
    let total_emissions: f64 = records.iter().map(|r| r.emissions).sum();
    let average_emissions = if records.is_empty() {
        0.0
    } else {
        total_emissions / records.len() as f64
    };

    // Strict `>` on a forward scan keeps the first of tied maxima.
    let mut max_record: Option<&EmissionRecord> = None;
    for rec in records {
        match max_record {
            Some(max) if rec.emissions <= max.emissions => {}
            _ => max_record = Some(rec),
        }
    }

    let mut emissions_by_type: BTreeMap<String, f64> = BTreeMap::new();
    let mut emissions_by_country: BTreeMap<String, f64> = BTreeMap::new();
    for rec in records {
        *emissions_by_type
            .entry(rec.emission_type.label().to_string())
            .or_insert(0.0) += rec.emissions;
        *emissions_by_country
            .entry(rec.country.clone())
            .or_insert(0.0) += rec.emissions;
    }

    AggregatedData {
        total_emissions,
        average_emissions,
        max_record: max_record.cloned(),
        emissions_by_type,
        emissions_by_country,
        emissions_by_year: aggregate_by_year(records),
    }
}

/// Group records into per-year points, ascending by year. Each known type
/// accumulates into its own slot; every record accumulates into `total`, so
/// unknown tags still count toward the year's sum.
fn aggregate_by_year(records: &[EmissionRecord]) -> Vec<YearPoint> {
    let mut by_year: BTreeMap<i32, YearPoint> = BTreeMap::new();

    for rec in records {
        let point = by_year
            .entry(rec.year)
            .or_insert_with(|| YearPoint::new(rec.year));

        let slot = match rec.emission_type {
            EmissionType::Co2 => Some(&mut point.co2),
            EmissionType::N2o => Some(&mut point.n2o),
            EmissionType::Ch4 => Some(&mut point.ch4),
            EmissionType::Other(_) => None,
        };
        if let Some(slot) = slot {
            *slot = Some(slot.unwrap_or(0.0) + rec.emissions);
        }
        point.total += rec.emissions;
    }

    // BTreeMap iteration is already ascending by year.
    by_year.into_values().collect()
}

// ---------------------------------------------------------------------------
// Facet extractor: raw records → selectable values and ranges
// ---------------------------------------------------------------------------

/// Extract unique dimension values and numeric ranges from the *unfiltered*
/// record set. Empty input yields the documented UI fallback ranges so the
/// filter widgets have sane bounds before any data arrives.
pub fn extract_facets(records: &[EmissionRecord]) -> FacetMetadata {
    if records.is_empty() {
        return FacetMetadata::default();
    }

    let countries = sorted_unique(records.iter().map(|r| r.country.as_str()));
    let activities = sorted_unique(records.iter().map(|r| r.activity.as_str()));
    let emission_types = sorted_unique(records.iter().map(|r| r.emission_type.label()));

    let mut year_range = (records[0].year, records[0].year);
    let mut emissions_range = (records[0].emissions, records[0].emissions);
    for rec in records {
        year_range.0 = year_range.0.min(rec.year);
        year_range.1 = year_range.1.max(rec.year);
        emissions_range.0 = emissions_range.0.min(rec.emissions);
        emissions_range.1 = emissions_range.1.max(rec.emissions);
    }

    FacetMetadata {
        countries,
        activities,
        emission_types,
        year_range,
        emissions_range,
    }
}

fn sorted_unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let set: BTreeSet<&str> = values.collect();
    set.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{DEFAULT_EMISSIONS_RANGE, DEFAULT_YEAR_RANGE};

    fn sample_records() -> Vec<EmissionRecord> {
        vec![
            record("Spain", 2020, "CO2", "Energy", 5.5),
            record("France", 2020, "CH4", "Agriculture", 3.2),
            record("Spain", 2021, "CO2", "Transport", 4.8),
            record("Germany", 2020, "N2O", "Energy", 6.1),
        ]
    }

    fn record(country: &str, year: i32, tag: &str, activity: &str, emissions: f64) -> EmissionRecord {
        EmissionRecord {
            year,
            emissions,
            emission_type: EmissionType::from(tag.to_string()),
            country: country.to_string(),
            activity: activity.to_string(),
        }
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn aggregates_totals_and_average() {
        let agg = aggregate(&sample_records());
        assert_close(agg.total_emissions, 19.6);
        assert_close(agg.average_emissions, 4.9);
    }

    #[test]
    fn max_record_is_greatest_emission() {
        let agg = aggregate(&sample_records());
        let max = agg.max_record.unwrap();
        assert_eq!(max.country, "Germany");
        assert_eq!(max.emissions, 6.1);
    }

    #[test]
    fn max_record_keeps_first_of_ties() {
        let records = vec![
            record("A", 2020, "CO2", "Energy", 5.0),
            record("B", 2020, "CO2", "Energy", 5.0),
        ];
        let agg = aggregate(&records);
        assert_eq!(agg.max_record.unwrap().country, "A");
    }

    #[test]
    fn empty_input_yields_zeroed_result() {
        let agg = aggregate(&[]);
        assert_eq!(agg.total_emissions, 0.0);
        assert_eq!(agg.average_emissions, 0.0);
        assert!(agg.max_record.is_none());
        assert!(agg.emissions_by_type.is_empty());
        assert!(agg.emissions_by_country.is_empty());
        assert!(agg.emissions_by_year.is_empty());
    }

    #[test]
    fn by_type_and_by_country_sums_match_total() {
        let agg = aggregate(&sample_records());
        let by_type: f64 = agg.emissions_by_type.values().sum();
        let by_country: f64 = agg.emissions_by_country.values().sum();
        assert_close(by_type, agg.total_emissions);
        assert_close(by_country, agg.total_emissions);
    }

    #[test]
    fn by_country_keys_are_distinct_values_seen() {
        let agg = aggregate(&sample_records());
        let countries: Vec<&str> = agg.emissions_by_country.keys().map(String::as_str).collect();
        assert_eq!(countries, ["France", "Germany", "Spain"]);
        assert_close(agg.emissions_by_country["Spain"], 10.3);
    }

    #[test]
    fn by_year_is_ascending_without_duplicates() {
        let series = aggregate(&sample_records()).emissions_by_year;
        let years: Vec<i32> = series.iter().map(|p| p.year).collect();
        assert_eq!(years, [2020, 2021]);
    }

    #[test]
    fn by_year_buckets_per_type_and_totals() {
        let series = aggregate(&sample_records()).emissions_by_year;

        let y2020 = &series[0];
        assert_close(y2020.co2.unwrap(), 5.5);
        assert_close(y2020.ch4.unwrap(), 3.2);
        assert_close(y2020.n2o.unwrap(), 6.1);
        assert_close(y2020.total, 14.8);

        let y2021 = &series[1];
        assert_close(y2021.co2.unwrap(), 4.8);
        assert!(y2021.ch4.is_none());
        assert!(y2021.n2o.is_none());
        assert_close(y2021.total, 4.8);
    }

    #[test]
    fn unknown_type_counts_toward_total_only() {
        let records = vec![
            record("Spain", 2020, "CO2", "Energy", 2.0),
            record("Spain", 2020, "SF6", "Industry", 1.5),
        ];
        let agg = aggregate(&records);

        let y2020 = &agg.emissions_by_year[0];
        assert_close(y2020.co2.unwrap(), 2.0);
        assert!(y2020.n2o.is_none());
        assert!(y2020.ch4.is_none());
        assert_close(y2020.total, 3.5);

        // The by-type map still tracks the unknown tag under its own label.
        assert_close(agg.emissions_by_type["SF6"], 1.5);
    }

    #[test]
    fn facets_are_sorted_and_deduplicated() {
        let facets = extract_facets(&sample_records());
        assert_eq!(facets.countries, ["France", "Germany", "Spain"]);
        assert_eq!(facets.activities, ["Agriculture", "Energy", "Transport"]);
        assert_eq!(facets.emission_types, ["CH4", "CO2", "N2O"]);
    }

    #[test]
    fn facet_ranges_span_the_dataset() {
        let facets = extract_facets(&sample_records());
        assert_eq!(facets.year_range, (2020, 2021));
        assert_eq!(facets.emissions_range, (3.2, 6.1));
    }

    #[test]
    fn empty_facets_use_documented_defaults() {
        let facets = extract_facets(&[]);
        assert_eq!(facets.year_range, DEFAULT_YEAR_RANGE);
        assert_eq!(facets.emissions_range, DEFAULT_EMISSIONS_RANGE);
        assert!(facets.countries.is_empty());
        assert!(facets.activities.is_empty());
        assert!(facets.emission_types.is_empty());
    }
}
