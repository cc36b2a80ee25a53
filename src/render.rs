//! The census render pipeline.
//!
//! ```text
//! CensusSource::fetch() ─▶ parse_jsonl() ─▶ Census::new()
//!                                               │
//!                       ┌───────────────────────┴──────────────┐
//!                       ▼                                      ▼
//!             update_stats() ─▶ PageTargets       init_charts() ─▶ ChartBackend
//! ```
//!
//! Any failure before the census exists is written to the status slot as
//! `"Error: {message}"` and nothing else is rendered.

use tracing::{debug, error, info, warn};

use crate::chart::{features_chart, nodes_chart, ChartBackend, ChartSlot};
use crate::data::{Census, Summary};
use crate::error::CensusError;
use crate::page::{PageTargets, Slot};
use crate::source::{parse_jsonl, CensusSource};

/// Fetch, parse and sort the census.
pub async fn load(source: &dyn CensusSource) -> Result<Census, CensusError> {
    debug!(source = source.description(), "fetching census");
    let body = source.fetch().await?;

    let snapshots = parse_jsonl(&body)?;
    for snapshot in &snapshots {
        for anomaly in snapshot.anomalies() {
            warn!(timestamp = snapshot.timestamp, "snapshot {}", anomaly);
        }
    }

    Census::new(snapshots).ok_or_else(|| CensusError::Empty {
        resource: source.resource().to_string(),
    })
}

/// Load the census and render it into `page` and `charts`.
///
/// On failure only the status slot is written. The census is returned so
/// callers can reuse it.
pub async fn load_and_render<P, C>(
    source: &dyn CensusSource,
    page: &mut P,
    charts: &mut C,
) -> Result<Census, CensusError>
where
    P: PageTargets + ?Sized,
    C: ChartBackend + ?Sized,
{
    match load(source).await {
        Ok(census) => {
            info!(
                snapshots = census.len(),
                latest = census.latest().timestamp,
                "census loaded"
            );
            update_stats(&census, page);
            init_charts(&census, charts);
            Ok(census)
        }
        Err(err) => {
            error!(source = source.description(), error = ?err, "failed to load census");
            page.set_text(Slot::LastRun, &err.status_text());
            Err(err)
        }
    }
}

/// Write the summary of the latest snapshot into the page slots.
pub fn update_stats<P>(census: &Census, page: &mut P)
where
    P: PageTargets + ?Sized,
{
    let summary = Summary::from_latest(census.latest());

    page.set_text(Slot::LastRun, &summary.last_run);
    page.set_text(Slot::TotalNodes, &summary.total_nodes);
    page.set_text(Slot::TotalContacted, &summary.total_contacted);

    for (n, stat) in (1u8..).zip(summary.ranked.iter()) {
        page.set_text(Slot::StatValue(n), &stat.display_value());
        page.set_text(Slot::StatLabel(n), stat.label);
    }
}

/// Render both charts and link them.
pub fn init_charts<C>(census: &Census, charts: &mut C)
where
    C: ChartBackend + ?Sized,
{
    let nodes = charts.render(ChartSlot::Nodes, nodes_chart(census));
    let features = charts.render(ChartSlot::Features, features_chart(census));
    charts.link(&[nodes, features]);
}
