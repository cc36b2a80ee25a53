//! Reader-based census source.
//!
//! Reads the census from any async byte stream, typically standard input
//! when the dashboard is fed by a pipe (`cat census.jsonl | census-dashboard render --source -`).

use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::{CensusSource, DEFAULT_RESOURCE};
use crate::error::CensusError;

/// A source that drains an async reader to EOF.
///
/// The reader is consumed by the first fetch; a second fetch sees an
/// empty body.
pub struct ReaderSource {
    reader: Mutex<Option<Box<dyn AsyncRead + Send + Unpin>>>,
    description: String,
}

impl ReaderSource {
    /// Wrap an async reader.
    pub fn new<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self {
            reader: Mutex::new(Some(Box::new(reader))),
            description: description.to_string(),
        }
    }

    /// Read the census from standard input.
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin(), "stdin")
    }
}

impl fmt::Debug for ReaderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderSource")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CensusSource for ReaderSource {
    async fn fetch(&self) -> Result<String, CensusError> {
        let taken = self
            .reader
            .lock()
            .map_err(|_| CensusError::fetch(DEFAULT_RESOURCE, "reader lock poisoned"))?
            .take();
        let Some(mut reader) = taken else {
            return Ok(String::new());
        };

        let mut body = String::new();
        reader
            .read_to_string(&mut body)
            .await
            .map_err(|e| CensusError::fetch(DEFAULT_RESOURCE, e))?;
        Ok(body)
    }

    fn resource(&self) -> &str {
        DEFAULT_RESOURCE
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_reader_source_reads_to_eof() {
        let data = "{\"a\":1}\n{\"a\":2}\n";
        let source = ReaderSource::new(Cursor::new(data.as_bytes().to_vec()), "test");

        assert_eq!(source.fetch().await.unwrap(), data);
        // Drained by the first fetch
        assert_eq!(source.fetch().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_reader_source_invalid_utf8() {
        let source = ReaderSource::new(Cursor::new(vec![0xff, 0xfe, b'\n']), "test");

        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.to_string(), "Could not load census.jsonl");
    }

    #[tokio::test]
    async fn test_reader_source_poisoned_lock() {
        let source = std::sync::Arc::new(ReaderSource::new(Cursor::new(b"{}\n".to_vec()), "test"));

        let holder = source.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.reader.lock().unwrap();
            panic!("reader dropped mid-read");
        })
        .join();

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CensusError::Fetch { .. }));
        assert_eq!(err.to_string(), "Could not load census.jsonl");
    }

    #[test]
    fn test_reader_source_description() {
        let source = ReaderSource::new(Cursor::new(Vec::new()), "pipe");
        assert_eq!(source.description(), "pipe");
        assert_eq!(source.resource(), "census.jsonl");
    }
}
