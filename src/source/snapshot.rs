//! Census snapshot records.
//!
//! These types match the JSON lines appended to `census.jsonl` by the
//! census crawler, one record per run. They are the only input this crate
//! consumes.

use serde::{Deserialize, Serialize};

use crate::error::CensusError;

/// One census run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the census was taken (Unix timestamp in seconds).
    pub timestamp: u64,

    /// Duration of the run in seconds.
    #[serde(default)]
    pub duration_seconds: u64,

    /// Peers attempted during the run (listening + non-listening).
    #[serde(default)]
    pub total_contacted: u64,

    /// Feature counts over the listening nodes.
    pub stats: FeatureStats,

    /// Version of the crawler that wrote the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub census_version: Option<String>,
}

/// Feature counts for the reachable nodes of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureStats {
    /// Reachable (listening) nodes.
    pub total_nodes: u64,
    /// Nodes advertising v2 transport.
    pub v2_transport: u64,
    /// Nodes advertising compact block filters.
    pub compact_filters: u64,
    /// Nodes advertising both.
    pub v2_and_filters: u64,
}

impl Snapshot {
    /// Timestamp in milliseconds, the unit chart time axes use.
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp.saturating_mul(1000)
    }

    /// Bounds this record breaks, if any.
    ///
    /// Records are never rejected for these; the loader only reports them.
    pub fn anomalies(&self) -> Vec<&'static str> {
        let s = &self.stats;
        let mut found = Vec::new();
        if s.compact_filters > s.total_nodes {
            found.push("compact_filters exceeds total_nodes");
        }
        if s.v2_transport > s.total_nodes {
            found.push("v2_transport exceeds total_nodes");
        }
        if s.v2_and_filters > s.compact_filters.min(s.v2_transport) {
            found.push("v2_and_filters exceeds min(compact_filters, v2_transport)");
        }
        if self.total_contacted < s.total_nodes {
            found.push("total_contacted is below total_nodes");
        }
        found
    }
}

/// Parse newline-delimited JSON into snapshots.
///
/// Blank lines are skipped. The first line that fails to parse aborts the
/// whole parse; its 1-based line number is reported.
pub fn parse_jsonl(text: &str) -> Result<Vec<Snapshot>, CensusError> {
    let mut snapshots = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let snapshot = serde_json::from_str::<Snapshot>(line)
            .map_err(|source| CensusError::Parse { line: idx + 1, source })?;
        snapshots.push(snapshot);
    }
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{"timestamp":1700000000,"duration_seconds":5400,"total_contacted":18000,"stats":{"total_nodes":1000,"v2_transport":600,"compact_filters":400,"v2_and_filters":250},"census_version":"0.3.0"}"#;

    #[test]
    fn test_deserialize_snapshot() {
        let snapshot: Snapshot = serde_json::from_str(RECORD).unwrap();
        assert_eq!(snapshot.timestamp, 1_700_000_000);
        assert_eq!(snapshot.duration_seconds, 5400);
        assert_eq!(snapshot.total_contacted, 18_000);
        assert_eq!(snapshot.stats.total_nodes, 1000);
        assert_eq!(snapshot.stats.v2_transport, 600);
        assert_eq!(snapshot.stats.compact_filters, 400);
        assert_eq!(snapshot.stats.v2_and_filters, 250);
        assert_eq!(snapshot.census_version.as_deref(), Some("0.3.0"));
        assert_eq!(snapshot.timestamp_ms(), 1_700_000_000_000);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"timestamp":1,"stats":{"total_nodes":3,"v2_transport":1,"compact_filters":1,"v2_and_filters":0},"connection_types":{}}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.total_contacted, 0);
        assert_eq!(snapshot.duration_seconds, 0);
        assert!(snapshot.census_version.is_none());
    }

    #[test]
    fn test_parse_jsonl_skips_blank_lines() {
        let text = format!("\n{RECORD}\r\n   \n{RECORD}\n\n");
        let snapshots = parse_jsonl(&text).unwrap();
        assert_eq!(snapshots.len(), 2);
    }

    #[test]
    fn test_parse_jsonl_empty_input() {
        assert!(parse_jsonl("").unwrap().is_empty());
        assert!(parse_jsonl("\n \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_jsonl_fails_fast_with_line_number() {
        let text = format!("{RECORD}\n\nnot json\n{RECORD}\n");
        let err = parse_jsonl(&text).unwrap_err();
        match err {
            CensusError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err_message(&text).contains("line 3"));
    }

    fn err_message(text: &str) -> String {
        parse_jsonl(text).unwrap_err().to_string()
    }

    #[test]
    fn test_anomalies() {
        let mut snapshot: Snapshot = serde_json::from_str(RECORD).unwrap();
        assert!(snapshot.anomalies().is_empty());

        snapshot.stats.compact_filters = 1200;
        snapshot.stats.v2_and_filters = 700;
        snapshot.total_contacted = 10;
        let found = snapshot.anomalies();
        assert_eq!(found.len(), 3);
        assert!(found.contains(&"compact_filters exceeds total_nodes"));
        assert!(found.contains(&"total_contacted is below total_nodes"));
    }
}
