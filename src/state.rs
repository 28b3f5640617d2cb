use crate::color::CategoryColors;
use crate::data::aggregate::{aggregate, extract_facets};
use crate::data::filter::apply_filters;
use crate::data::model::{
    AggregatedData, EmissionRecord, FacetMetadata, FilterCriteria, SortField, TableCriteria,
};
use crate::data::table::{process_table, TableData};

/// Rows shown per table page.
pub const PAGE_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which central view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Table,
}

/// The full UI state, independent of rendering.
///
/// Derived results are plain caches over the pure pipeline functions:
/// whenever records or a criteria object change, the corresponding
/// `recompute*` method rebuilds them from scratch.
pub struct AppState {
    /// Raw records as loaded; read-only afterwards.
    pub records: Vec<EmissionRecord>,

    /// Dashboard-wide filter criteria, replaced wholesale on every edit.
    pub criteria: FilterCriteria,
    /// Table-view criteria, independent of `criteria`.
    pub table_criteria: TableCriteria,
    /// Current 1-based table page.
    pub current_page: usize,

    /// Records passing `criteria` (cached).
    pub filtered: Vec<EmissionRecord>,
    /// Summary statistics over `filtered` (cached).
    pub aggregated: AggregatedData,
    /// Facets of the unfiltered dataset (cached).
    pub facets: FacetMetadata,
    /// Table pipeline output (cached).
    pub table: TableData,

    /// Per-country series colours for the charts.
    pub colors: CategoryColors,

    pub view: View,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            criteria: FilterCriteria::default(),
            table_criteria: TableCriteria::default(),
            current_page: 1,
            filtered: Vec::new(),
            aggregated: AggregatedData::default(),
            facets: FacetMetadata::default(),
            table: TableData::default(),
            colors: CategoryColors::default(),
            view: View::Dashboard,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a freshly loaded dataset: reset both criteria objects and
    /// rebuild every derived result.
    pub fn set_records(&mut self, records: Vec<EmissionRecord>) {
        self.records = records;
        self.criteria = FilterCriteria::default();
        self.table_criteria = TableCriteria::default();
        self.current_page = 1;

        self.facets = extract_facets(&self.records);
        self.colors = CategoryColors::new(&self.facets.countries);
        self.recompute();
        self.recompute_table();

        self.status_message = None;
        self.loading = false;
    }

    /// Replace the dashboard criteria and recompute the filtered/aggregated
    /// caches.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    /// Replace the table criteria, jump back to page 1, and recompute the
    /// table cache.
    pub fn set_table_criteria(&mut self, criteria: TableCriteria) {
        self.table_criteria = criteria;
        self.current_page = 1;
        self.recompute_table();
    }

    /// Toggle the sort on a table column: a new column sorts ascending, the
    /// same column flips direction.
    pub fn toggle_sort(&mut self, field: SortField) {
        let mut criteria = self.table_criteria.clone();
        if criteria.sort_field == field {
            criteria.sort_order = criteria.sort_order.toggled();
        } else {
            criteria.sort_field = field;
            criteria.sort_order = crate::data::model::SortOrder::Ascending;
        }
        self.set_table_criteria(criteria);
    }

    /// Move to a table page; out-of-range values are clamped by the pipeline
    /// into an empty slice, so no validation is needed here.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
        self.recompute_table();
    }

    /// Rebuild the filtered and aggregated caches from the raw records.
    pub fn recompute(&mut self) {
        self.filtered = apply_filters(&self.records, &self.criteria);
        self.aggregated = aggregate(&self.filtered);
    }

    /// Rebuild the table cache for the current criteria and page.
    pub fn recompute_table(&mut self) {
        self.table = process_table(
            &self.records,
            &self.table_criteria,
            self.current_page,
            PAGE_SIZE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{EmissionType, SortOrder};

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.set_records(vec![
            EmissionRecord {
                year: 2020,
                emissions: 5.5,
                emission_type: EmissionType::Co2,
                country: "Spain".to_string(),
                activity: "Energy".to_string(),
            },
            EmissionRecord {
                year: 2021,
                emissions: 3.2,
                emission_type: EmissionType::Ch4,
                country: "France".to_string(),
                activity: "Agriculture".to_string(),
            },
        ]);
        state
    }

    #[test]
    fn set_records_rebuilds_all_caches() {
        let state = loaded_state();
        assert_eq!(state.filtered.len(), 2);
        assert!((state.aggregated.total_emissions - 8.7).abs() < 1e-9);
        assert_eq!(state.facets.countries, ["France", "Spain"]);
        assert_eq!(state.table.sorted.len(), 2);
    }

    #[test]
    fn set_criteria_recomputes_filtered_and_aggregated() {
        let mut state = loaded_state();
        state.set_criteria(FilterCriteria {
            countries: vec!["Spain".to_string()],
            ..FilterCriteria::default()
        });
        assert_eq!(state.filtered.len(), 1);
        assert!((state.aggregated.total_emissions - 5.5).abs() < 1e-9);
        // Facets keep describing the full dataset.
        assert_eq!(state.facets.countries, ["France", "Spain"]);
    }

    #[test]
    fn table_criteria_change_resets_page() {
        let mut state = loaded_state();
        state.set_page(3);
        assert_eq!(state.current_page, 3);
        state.set_table_criteria(TableCriteria {
            search: "France".to_string(),
            ..TableCriteria::default()
        });
        assert_eq!(state.current_page, 1);
        assert_eq!(state.table.filtered.len(), 1);
    }

    #[test]
    fn toggle_sort_flips_direction_on_same_column() {
        let mut state = loaded_state();
        state.toggle_sort(SortField::Country);
        assert_eq!(state.table_criteria.sort_field, SortField::Country);
        assert_eq!(state.table_criteria.sort_order, SortOrder::Ascending);
        state.toggle_sort(SortField::Country);
        assert_eq!(state.table_criteria.sort_order, SortOrder::Descending);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut state = loaded_state();
        let before = state.aggregated.clone();
        state.recompute();
        assert_eq!(state.aggregated, before);
    }
}
