//! File-based census source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{resource_name, CensusSource};
use crate::error::CensusError;

/// A source that reads `census.jsonl` from the local filesystem.
///
/// This is the usual mode when the dashboard is built next to the
/// crawler's output directory.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    resource: String,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let resource = resource_name(&path.to_string_lossy());
        let description = format!("file: {}", path.display());
        Self {
            path,
            resource,
            description,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CensusSource for FileSource {
    async fn fetch(&self) -> Result<String, CensusError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CensusError::fetch(&self.resource, e))
    }

    fn resource(&self) -> &str {
        &self.resource
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/census.jsonl");
        assert_eq!(source.path(), Path::new("/tmp/census.jsonl"));
        assert_eq!(source.description(), "file: /tmp/census.jsonl");
        assert_eq!(source.resource(), "census.jsonl");
    }

    #[tokio::test]
    async fn test_file_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"timestamp":1,"stats":{{"total_nodes":1,"v2_transport":0,"compact_filters":0,"v2_and_filters":0}}}}"#).unwrap();

        let source = FileSource::new(file.path());
        let body = source.fetch().await.unwrap();
        assert!(body.contains("\"timestamp\":1"));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/path/census.jsonl");

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CensusError::Fetch { .. }));
        assert!(err.to_string().contains("Could not load census.jsonl"));
    }
}
