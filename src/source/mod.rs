//! Census data sources.
//!
//! The renderer reads the census through the [`CensusSource`] trait so it
//! does not care whether `census.jsonl` lives on disk, behind a web
//! server, or arrives on standard input.

mod file;
mod http;
mod reader;
mod snapshot;

pub use file::FileSource;
pub use http::HttpSource;
pub use reader::ReaderSource;
pub use snapshot::{parse_jsonl, FeatureStats, Snapshot};

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::CensusError;

/// Resource name used in messages when a location has no file name.
pub const DEFAULT_RESOURCE: &str = "census.jsonl";

/// Trait for reading the raw census text.
///
/// # Example
///
/// ```
/// use census_dashboard::{CensusSource, FileSource};
///
/// let source = FileSource::new("census.jsonl");
/// assert_eq!(source.resource(), "census.jsonl");
/// ```
#[async_trait]
pub trait CensusSource: Send + Sync + Debug {
    /// Read the whole resource as UTF-8 text.
    ///
    /// Any failure to obtain the body is reported as [`CensusError::Fetch`].
    async fn fetch(&self) -> Result<String, CensusError>;

    /// Name of the resource, as shown in error messages.
    fn resource(&self) -> &str;

    /// Human-readable description of the source, used in logs.
    fn description(&self) -> &str;
}

/// Pick a source for a location string.
///
/// `-` reads standard input, `http://` and `https://` locations are
/// fetched over HTTP, anything else is a filesystem path.
pub fn open(location: &str) -> Box<dyn CensusSource> {
    if location == "-" {
        Box::new(ReaderSource::stdin())
    } else if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Last path segment of a location, falling back to [`DEFAULT_RESOURCE`].
pub(crate) fn resource_name(location: &str) -> String {
    let path = location.split(['?', '#']).next().unwrap_or_default();
    match path.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_RESOURCE.to_string(),
    }
}
