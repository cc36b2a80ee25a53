//! Census processing.
//!
//! This module turns the raw snapshot records into what the dashboard
//! displays.
//!
//! ## Submodules
//!
//! - [`census`]: the sorted, non-empty [`Census`] sequence
//! - [`stats`]: feature percentages, ranking and the [`Summary`]
//! - [`format`]: grouped integers, long dates and percent strings
//!
//! ## Data Flow
//!
//! ```text
//! Vec<Snapshot> (parsed JSON lines)
//!        │
//!        ▼
//! Census::new()  ── sorts by timestamp
//!        │
//!        ├──▶ Summary::from_latest() (summary slots)
//!        │
//!        └──▶ chart::nodes_chart() / chart::features_chart()
//! ```

pub mod census;
pub mod format;
pub mod stats;

pub use census::Census;
pub use stats::{percentage, ranked_stats, round1, Feature, PercentageStat, Summary};
