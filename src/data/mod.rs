/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  dataexport_*.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  skip preamble, parse lines → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<TemperatureReading>, temperature range
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  tolerance band around target → matching indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  365×24 occupancy grid + statistics
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
