/// Data layer: launch records, loading, control options and chart aggregation.
///
/// Architecture:
/// ```text
///  spacex_launch_dash.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate CSV → LaunchTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable  │  Vec<LaunchRecord>, immutable
///   └─────────────┘
///      │        │
///      ▼        ▼
///  ┌─────────┐ ┌───────────┐
///  │ options  │ │ aggregate  │  site list / pie + scatter tables
///  └─────────┘ └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
pub mod options;
