//! HTTP census source.
//!
//! Fetches `census.jsonl` from the web server the crawler publishes to.

use async_trait::async_trait;
use reqwest::Client;

use super::{resource_name, CensusSource};
use crate::error::CensusError;

/// A source that GETs the census over HTTP(S).
///
/// Any non-success status is a fetch failure; there is no retry.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
    resource: String,
    description: String,
}

impl HttpSource {
    /// Create a source for the given URL.
    pub fn new(url: &str) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// Create a source that reuses an existing client.
    pub fn with_client(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
            resource: resource_name(url),
            description: format!("http: {}", url),
        }
    }

    /// Returns the URL being fetched.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CensusSource for HttpSource {
    async fn fetch(&self) -> Result<String, CensusError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CensusError::fetch(&self.resource, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CensusError::fetch(
                &self.resource,
                format!("HTTP status {}", status),
            ));
        }

        response.text().await.map_err(|e| CensusError::fetch(&self.resource, e))
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
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response on a local port.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/census.jsonl", addr)
    }

    #[test]
    fn test_http_source_new() {
        let source = HttpSource::new("https://example.org/data/census.jsonl");
        assert_eq!(source.url(), "https://example.org/data/census.jsonl");
        assert_eq!(source.resource(), "census.jsonl");
        assert_eq!(source.description(), "http: https://example.org/data/census.jsonl");
    }

    #[tokio::test]
    async fn test_http_source_reads_body() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/x-ndjson\r\nContent-Length: 3\r\nConnection: close\r\n\r\n{}\n",
        )
        .await;

        let source = HttpSource::new(&url);
        assert_eq!(source.fetch().await.unwrap(), "{}\n");
    }

    #[tokio::test]
    async fn test_http_source_not_found() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let err = HttpSource::new(&url).fetch().await.unwrap_err();
        assert_eq!(err.to_string(), "Could not load census.jsonl");
    }

    #[tokio::test]
    async fn test_http_source_connection_refused() {
        // Bind and drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::new(&format!("http://{}/census.jsonl", addr));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CensusError::Fetch { .. }));
    }
}
