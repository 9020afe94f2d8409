/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → InducteeDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  CategoryFilter → matching records
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  per-year counts → positive / negative stacks, summary
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
