use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EmissionType – categorical tag with a known set plus a fallback
// ---------------------------------------------------------------------------

/// Emission gas category. The three known tags get their own chart series;
/// anything else is carried verbatim in `Other` and counted only in totals.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmissionType {
    Co2,
    N2o,
    Ch4,
    Other(String),
}

impl From<String> for EmissionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CO2" => EmissionType::Co2,
            "N2O" => EmissionType::N2o,
            "CH4" => EmissionType::Ch4,
            _ => EmissionType::Other(s),
        }
    }
}

impl From<EmissionType> for String {
    fn from(t: EmissionType) -> String {
        t.to_string()
    }
}

impl EmissionType {
    /// Canonical label as it appears in the source data.
    pub fn label(&self) -> &str {
        match self {
            EmissionType::Co2 => "CO2",
            EmissionType::N2o => "N2O",
            EmissionType::Ch4 => "CH4",
            EmissionType::Other(s) => s,
        }
    }
}

impl fmt::Display for EmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// EmissionRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single emission observation. Immutable after load; every derived
/// structure is recomputed from scratch, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    /// Calendar year of the observation.
    pub year: i32,
    /// Emitted quantity in megatonnes.
    pub emissions: f64,
    pub emission_type: EmissionType,
    pub country: String,
    pub activity: String,
}

// ---------------------------------------------------------------------------
// FilterCriteria – dashboard-wide filter state
// ---------------------------------------------------------------------------

/// Active filter constraints for the dashboard view. An empty list or `None`
/// bound means "no constraint"; all predicates are ANDed together.
///
/// Owned by the state layer and replaced wholesale on every edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub countries: Vec<String>,
    pub emission_types: Vec<EmissionType>,
    pub activities: Vec<String>,
    /// Inclusive `(min, max)` year bound.
    pub year_range: Option<(i32, i32)>,
    pub min_emissions: Option<f64>,
    pub max_emissions: Option<f64>,
}

impl FilterCriteria {
    /// Whether any constraint is active.
    pub fn is_active(&self) -> bool {
        *self != FilterCriteria::default()
    }
}

// ---------------------------------------------------------------------------
// AggregatedData – summary statistics over a filtered record set
// ---------------------------------------------------------------------------

/// One point of the per-year series. A per-type slot stays `None` for years
/// in which that type never occurs, so charts render gaps rather than zeros.
/// Unknown type tags contribute to `total` only.
#[derive(Debug, Clone, PartialEq)]
pub struct YearPoint {
    pub year: i32,
    pub co2: Option<f64>,
    pub n2o: Option<f64>,
    pub ch4: Option<f64>,
    pub total: f64,
}

impl YearPoint {
    pub fn new(year: i32) -> Self {
        YearPoint {
            year,
            co2: None,
            n2o: None,
            ch4: None,
            total: 0.0,
        }
    }
}

/// Summary statistics derived from a (usually filtered) record set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedData {
    pub total_emissions: f64,
    /// Mean emissions per record; exactly `0` for an empty input.
    pub average_emissions: f64,
    /// Record with the greatest `emissions` value; ties keep the first seen.
    pub max_record: Option<EmissionRecord>,
    /// Summed emissions keyed by type label.
    pub emissions_by_type: BTreeMap<String, f64>,
    /// Summed emissions keyed by country.
    pub emissions_by_country: BTreeMap<String, f64>,
    /// Per-year series, ascending by year, no duplicate years.
    pub emissions_by_year: Vec<YearPoint>,
}

// ---------------------------------------------------------------------------
// FacetMetadata – selectable values for the filter controls
// ---------------------------------------------------------------------------

/// Year range offered by the UI before any data is loaded.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (2015, 2023);
/// Emissions range offered by the UI before any data is loaded.
pub const DEFAULT_EMISSIONS_RANGE: (f64, f64) = (0.0, 10.0);

/// Unique dimension values and numeric ranges of the *unfiltered* dataset.
/// Filter widgets always offer the full universe of values, independent of
/// the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetMetadata {
    /// Sorted, deduplicated.
    pub countries: Vec<String>,
    pub activities: Vec<String>,
    pub emission_types: Vec<String>,
    /// `(min, max)` over all record years; [`DEFAULT_YEAR_RANGE`] when empty.
    pub year_range: (i32, i32),
    /// `(min, max)` over all record emissions; [`DEFAULT_EMISSIONS_RANGE`] when empty.
    pub emissions_range: (f64, f64),
}

impl Default for FacetMetadata {
    fn default() -> Self {
        FacetMetadata {
            countries: Vec::new(),
            activities: Vec::new(),
            emission_types: Vec::new(),
            year_range: DEFAULT_YEAR_RANGE,
            emissions_range: DEFAULT_EMISSIONS_RANGE,
        }
    }
}

// ---------------------------------------------------------------------------
// TableCriteria – independent filter/sort state for the table view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Year,
    Country,
    Activity,
    Type,
    Emissions,
}

impl SortField {
    /// Column header label.
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Year => "Year",
            SortField::Country => "Country",
            SortField::Activity => "Activity",
            SortField::Type => "Type",
            SortField::Emissions => "Emissions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Filter, search, and sort state for the tabular view. Independent of
/// [`FilterCriteria`]: the table has its own surface over the raw records.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCriteria {
    /// Free-text search, matched case-insensitively against every field.
    pub search: String,
    pub countries: Vec<String>,
    pub types: Vec<String>,
    pub activities: Vec<String>,
    /// Inclusive year bounds.
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl Default for TableCriteria {
    fn default() -> Self {
        TableCriteria {
            search: String::new(),
            countries: Vec::new(),
            types: Vec::new(),
            activities: Vec::new(),
            year_from: None,
            year_to: None,
            // Newest years first is the table's initial presentation.
            sort_field: SortField::Year,
            sort_order: SortOrder::Descending,
        }
    }
}
