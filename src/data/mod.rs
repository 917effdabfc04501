/// Data layer: schema, loading, and splitting.
///
/// Architecture:
/// ```text
///   diabetes.csv (headers, noise, ragged rows)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  strict parse → lenient fallback → clean Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  named columns, Vec<Vec<f64>> rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  split    │  stratified, seeded train/test partition
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod schema;
pub mod split;
