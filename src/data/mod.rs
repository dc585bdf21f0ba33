/// Data layer: core types, loading, filtering, derivation, classification.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → rows → schema → Catalog
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  temperature cut, first row per star_id
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  estimated mass, estimated lifespan
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  log g → Category
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  Catalog → .csv / .tsv / .json / .parquet
///   └──────────┘
/// ```

pub mod classify;
pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
pub mod writer;
