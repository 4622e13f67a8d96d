/// Data layer: table model, input schema and loading.
///
/// Architecture:
/// ```text
///  data/*.csv (one file tab-separated)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table, check required columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Datasets  │  six immutable tables, sea level in mm derived
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod schema;
