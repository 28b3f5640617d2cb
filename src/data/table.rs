use std::collections::BTreeSet;

use super::model::{
    EmissionRecord, FacetMetadata, SortField, SortOrder, TableCriteria, DEFAULT_YEAR_RANGE,
};

// ---------------------------------------------------------------------------
// Table processor: independent filter → sort → paginate pipeline
// ---------------------------------------------------------------------------

/// Everything the table view needs for one render: the intermediate stages,
/// pagination bookkeeping, and the facet values for its filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub filtered: Vec<EmissionRecord>,
    pub sorted: Vec<EmissionRecord>,
    /// The current page slice of `sorted`.
    pub paginated: Vec<EmissionRecord>,
    pub total_pages: usize,
    /// 1-based inclusive display range of the current page.
    pub start_item: usize,
    /// Capped at the sorted count; `0` when there are no rows.
    pub end_item: usize,
    /// Facets computed from the *unfiltered* input, so the dropdowns always
    /// offer the full option set.
    pub countries: Vec<String>,
    pub types: Vec<String>,
    pub activities: Vec<String>,
    pub year_range: (i32, i32),
}

/// Run the full table pipeline: filter by `criteria`, sort, slice out the
/// requested page, and collect facet values from the raw input.
pub fn process_table(
    records: &[EmissionRecord],
    criteria: &TableCriteria,
    page: usize,
    page_size: usize,
) -> TableData {
    let filtered = filter_rows(records, criteria);
    let sorted = sort_rows(filtered.clone(), criteria.sort_field, criteria.sort_order);
    let paginated = paginate(&sorted, page, page_size);
    let total_pages = total_pages(sorted.len(), page_size);
    let (start_item, end_item) = page_range(page, page_size, sorted.len());
    let facets = table_facets(records);

    TableData {
        filtered,
        sorted,
        paginated,
        total_pages,
        start_item,
        end_item,
        countries: facets.countries,
        types: facets.emission_types,
        activities: facets.activities,
        year_range: facets.year_range,
    }
}

/// Apply the table's search box and per-field filters.
///
/// The search term matches case-insensitively against country, activity,
/// type label, and the decimal renderings of year and emissions; a record
/// passes if ANY field contains it. The remaining filters AND together with
/// the same inclusive-when-empty policy as the dashboard filter.
pub fn filter_rows(records: &[EmissionRecord], criteria: &TableCriteria) -> Vec<EmissionRecord> {
    let search = criteria.search.to_lowercase();

    records
        .iter()
        .filter(|rec| {
            if !search.is_empty() && !matches_search(rec, &search) {
                return false;
            }
            if !criteria.countries.is_empty() && !criteria.countries.contains(&rec.country) {
                return false;
            }
            if !criteria.types.is_empty()
                && !criteria.types.iter().any(|t| t == rec.emission_type.label())
            {
                return false;
            }
            if !criteria.activities.is_empty() && !criteria.activities.contains(&rec.activity) {
                return false;
            }
            if let Some(from) = criteria.year_from {
                if rec.year < from {
                    return false;
                }
            }
            if let Some(to) = criteria.year_to {
                if rec.year > to {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

fn matches_search(rec: &EmissionRecord, search_lower: &str) -> bool {
    rec.country.to_lowercase().contains(search_lower)
        || rec.activity.to_lowercase().contains(search_lower)
        || rec.emission_type.label().to_lowercase().contains(search_lower)
        || rec.year.to_string().contains(search_lower)
        || rec.emissions.to_string().contains(search_lower)
}

/// Sort by the selected field. Strings compare lexicographically, numerics
/// numerically (`total_cmp` for emissions, so NaN orders deterministically).
pub fn sort_rows(
    mut rows: Vec<EmissionRecord>,
    field: SortField,
    order: SortOrder,
) -> Vec<EmissionRecord> {
    rows.sort_by(|a, b| {
        let cmp = match field {
            SortField::Year => a.year.cmp(&b.year),
            SortField::Country => a.country.cmp(&b.country),
            SortField::Activity => a.activity.cmp(&b.activity),
            SortField::Type => a.emission_type.label().cmp(b.emission_type.label()),
            SortField::Emissions => a.emissions.total_cmp(&b.emissions),
        };
        match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    });
    rows
}

/// Slice out the 1-based `page`. Out-of-range pages yield an empty slice.
pub fn paginate(rows: &[EmissionRecord], page: usize, page_size: usize) -> Vec<EmissionRecord> {
    let start = (page.saturating_sub(1)) * page_size;
    if start >= rows.len() {
        return Vec::new();
    }
    let end = (start + page_size).min(rows.len());
    rows[start..end].to_vec()
}

pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    row_count.div_ceil(page_size)
}

/// 1-based inclusive display range for "showing X–Y of N" labels. An empty
/// result keeps `start = (page-1)*size + 1` with `end = 0`, which the UI
/// renders as an empty range.
pub fn page_range(page: usize, page_size: usize, total_items: usize) -> (usize, usize) {
    let start = (page.saturating_sub(1)) * page_size + 1;
    let end = (page * page_size).min(total_items);
    (start, end)
}

/// Page-number list for the pagination control; `None` is the ellipsis slot.
///
/// Seven or fewer pages are listed in full. Otherwise the window shows the
/// first five / last page near the start, the first page / last five near the
/// end, and first / current±1 / last in the middle.
pub fn page_numbers(current_page: usize, total_pages: usize) -> Vec<Option<usize>> {
    let mut pages = Vec::new();

    if total_pages <= 7 {
        pages.extend((1..=total_pages).map(Some));
    } else if current_page <= 4 {
        pages.extend((1..=5).map(Some));
        pages.push(None);
        pages.push(Some(total_pages));
    } else if current_page >= total_pages - 3 {
        pages.push(Some(1));
        pages.push(None);
        pages.extend((total_pages - 4..=total_pages).map(Some));
    } else {
        pages.push(Some(1));
        pages.push(None);
        pages.extend((current_page - 1..=current_page + 1).map(Some));
        pages.push(None);
        pages.push(Some(total_pages));
    }

    pages
}

/// Facet values for the table's own dropdowns, from the unfiltered input.
fn table_facets(records: &[EmissionRecord]) -> FacetMetadata {
    let countries: BTreeSet<&str> = records.iter().map(|r| r.country.as_str()).collect();
    let emission_types: BTreeSet<&str> =
        records.iter().map(|r| r.emission_type.label()).collect();
    let activities: BTreeSet<&str> = records.iter().map(|r| r.activity.as_str()).collect();

    let year_range = records
        .iter()
        .map(|r| r.year)
        .fold(None, |acc: Option<(i32, i32)>, y| match acc {
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            None => Some((y, y)),
        })
        .unwrap_or(DEFAULT_YEAR_RANGE);

    FacetMetadata {
        countries: countries.into_iter().map(String::from).collect(),
        activities: activities.into_iter().map(String::from).collect(),
        emission_types: emission_types.into_iter().map(String::from).collect(),
        year_range,
        ..FacetMetadata::default()
    }
}
