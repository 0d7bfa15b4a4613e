/// Data layer: core types, loading, filtering, and distance.
///
/// Architecture:
/// ```text
///  sheet CSV (HTTP) / local .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  columns 10..14 → category, name, X, Y; drop non-numeric rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Point>
///   └──────────┘
///        │                         │
///        ▼                         ▼
///   ┌──────────┐             ┌──────────┐
///   │  filter   │ criteria →  │ distance  │  unfiltered lookup by name
///   └──────────┘ visible set  └──────────┘
///        │
///        ▼
///   crate::scene::build
/// ```

pub mod distance;
pub mod filter;
pub mod loader;
pub mod model;
