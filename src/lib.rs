//! # census-dashboard
//!
//! Renders a dashboard for peer-to-peer network census runs.
//!
//! A census is a JSON Lines file where every line is one crawl snapshot:
//! when it ran, how many peers were contacted, and how many listening nodes
//! advertised each feature. This crate loads that file, summarises the most
//! recent snapshot, and draws two time-series charts, either into a static
//! HTML page driven by ECharts or into an interactive terminal view.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌───────────┐  │
//! │  │ source  │───▶│   data   │───▶│  render  │───▶│ page/chart│  │
//! │  │ (fetch) │    │ (census) │    │(pipeline)│    │  (ports)  │  │
//! │  └─────────┘    └──────────┘    └──────────┘    └─────┬─────┘  │
//! │                                                       │        │
//! │                                  HtmlDashboard ◀──────┼──────▶ App/ChartDeck
//! │                                  (ECharts page)              (ratatui view)
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: The [`CensusSource`] trait with file, HTTP and reader
//!   implementations, plus the snapshot record and JSON Lines parser
//! - **[`data`]**: The sorted [`Census`], percentage math and the
//!   [`Summary`] of the latest snapshot
//! - **[`chart`]**: Chart options, the [`ChartBackend`] port and the ECharts theme
//! - **[`page`]**: Named text [`Slot`]s, the [`PageTargets`] port and the
//!   static HTML adapter
//! - **[`render`]**: The pipeline tying it all together
//! - **[`app`]**, **[`ui`]**, **[`events`]**: The terminal adapter
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Write index.html from a local census
//! census-dashboard render --source census.jsonl --output index.html
//!
//! # Browse a remote census in the terminal
//! census-dashboard view --source https://example.org/census.jsonl
//! ```
//!
//! ### As a library
//!
//! ```
//! use census_dashboard::{
//!     load_and_render, EchartsTheme, HtmlDashboard, ReaderSource, DEFAULT_LAYOUT,
//! };
//!
//! # tokio_test::block_on(async {
//! const BODY: &[u8] = br#"{"timestamp":1700000000,"total_contacted":18234,"stats":{"total_nodes":1000,"v2_transport":600,"compact_filters":400,"v2_and_filters":250}}"#;
//! let source = ReaderSource::new(BODY, "inline");
//!
//! let mut page = HtmlDashboard::new("https://cdn.example/echarts.esm.js");
//! let (text, charts) = page.targets();
//! load_and_render(&source, text, charts).await.unwrap();
//!
//! let html = page.render_document(DEFAULT_LAYOUT, &EchartsTheme::default()).unwrap();
//! assert!(html.contains("Last run November 14, 2023"));
//! # });
//! ```

pub mod app;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod page;
pub mod render;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, ChartDeck};
pub use chart::{ChartBackend, ChartHandle, ChartOption, ChartSlot, EchartsTheme};
pub use config::Settings;
pub use data::{Census, Summary};
pub use error::{CensusError, PageError};
pub use page::{ChartScript, HtmlDashboard, PageTargets, PageText, Slot, DEFAULT_LAYOUT};
pub use render::{init_charts, load, load_and_render, update_stats};
pub use source::{
    parse_jsonl, CensusSource, FeatureStats, FileSource, HttpSource, ReaderSource, Snapshot,
};
