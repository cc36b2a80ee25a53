//! Error types for loading and rendering a census.

use thiserror::Error;

/// Errors that end a census load.
///
/// The `Display` text of each variant is what the status slot shows after
/// the `"Error: "` prefix.
#[derive(Debug, Error)]
pub enum CensusError {
    /// The resource could not be read (missing file, non-success status,
    /// transport failure).
    #[error("Could not load {resource}")]
    Fetch {
        resource: String,
        #[source]
        reason: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The resource was read but held no records.
    #[error("No data found in {resource}")]
    Empty { resource: String },

    /// A line of the resource is not a valid snapshot record.
    #[error("Malformed record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl CensusError {
    /// Build a fetch error from any underlying failure.
    pub fn fetch<E>(resource: &str, reason: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        CensusError::Fetch {
            resource: resource.to_string(),
            reason: reason.into(),
        }
    }

    /// Text written to the status slot when this error ends a load.
    pub fn status_text(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Errors raised while filling an HTML layout.
#[derive(Debug, Error)]
pub enum PageError {
    /// The layout has no element with the id a slot writes to.
    #[error("Layout has no element with id \"{0}\"")]
    MissingSlot(String),

    /// The layout has no closing `</body>` to place the chart script before.
    #[error("Layout has no </body> tag")]
    MissingBody,

    /// A chart option could not be serialized.
    #[error("Failed to serialize chart option: {0}")]
    Serialize(#[from] serde_json::Error),
}
