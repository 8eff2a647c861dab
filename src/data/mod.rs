/// Data layer: core types, CSV input/output, and row filtering.
///
/// Architecture:
/// ```text
///   messy .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (typed cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  predicate → kept Table + removed indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  saver    │  Table → cleaned .csv (no index)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod saver;
