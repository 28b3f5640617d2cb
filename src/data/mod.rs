/// Data layer: record types, loading, and the pure transformation pipeline.
///
/// Architecture:
/// ```text
///  .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<EmissionRecord>
///   └──────────┘
///        │
///        ├──────────────────────────────┐
///        ▼                              ▼
///   ┌──────────┐                  ┌──────────┐
///   │  filter   │  criteria →     │  table    │  search/sort/paginate
///   └──────────┘  filtered set    └──────────┘  for the tabular view
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  totals, per-year series, facet metadata
///   └───────────┘
/// ```
///
/// Every function below the loader is pure: identical inputs always produce
/// identical outputs, and nothing mutates the record set in place.

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod table;
