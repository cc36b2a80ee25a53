//! Feature adoption percentages and the summary shown above the charts.

use serde::Serialize;

use super::format::{group_thousands, long_date, percent};
use crate::source::{FeatureStats, Snapshot};

/// A protocol feature tracked by the census.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    CompactFilters,
    V2Transport,
    /// Nodes advertising both compact filters and v2 transport.
    Both,
}

impl Feature {
    /// Order of the summary stats before ranking.
    pub const SUMMARY_ORDER: [Feature; 3] =
        [Feature::CompactFilters, Feature::V2Transport, Feature::Both];

    /// Order of the series in the features chart.
    pub const CHART_ORDER: [Feature; 3] =
        [Feature::V2Transport, Feature::CompactFilters, Feature::Both];

    /// Label used in the summary slots.
    pub fn label(&self) -> &'static str {
        match self {
            Feature::CompactFilters => "Compact Filters",
            Feature::V2Transport => "V2 Transport",
            Feature::Both => "Compact Filters & V2 Transport",
        }
    }

    /// Name of this feature's chart series.
    pub fn series_name(&self) -> &'static str {
        match self {
            Feature::CompactFilters => "Compact Filters",
            Feature::V2Transport => "V2 Transport",
            Feature::Both => "Both Features",
        }
    }

    /// Number of nodes advertising this feature.
    pub fn count(&self, stats: &FeatureStats) -> u64 {
        match self {
            Feature::CompactFilters => stats.compact_filters,
            Feature::V2Transport => stats.v2_transport,
            Feature::Both => stats.v2_and_filters,
        }
    }

    /// Share of listening nodes advertising this feature, rounded to one
    /// decimal.
    pub fn share(&self, stats: &FeatureStats) -> f64 {
        round1(percentage(self.count(stats), stats.total_nodes))
    }
}

/// `count / total * 100`, or 0 when there are no nodes.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Round to one decimal place from the exact decimal value of `value`.
///
/// `value * 10` is never formed, so 0.44999999999999996 stays below the
/// tie. Exact ties only occur at odd quarters (0.25, 12.75, ...) and go to
/// the larger magnitude.
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let quarters = value.abs() * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return ((value.abs() * 10.0).ceil() / 10.0).copysign(value);
    }
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// A labelled percentage for one of the summary slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentageStat {
    pub label: &'static str,
    /// Percentage in `[0, 100]`, one decimal.
    pub value: f64,
}

impl PercentageStat {
    fn of(feature: Feature, stats: &FeatureStats) -> Self {
        Self {
            label: feature.label(),
            value: feature.share(stats).min(100.0),
        }
    }

    /// Value as shown on the page, e.g. "60.0%".
    pub fn display_value(&self) -> String {
        percent(self.value)
    }
}

/// The three feature percentages, highest first.
///
/// Ties keep [`Feature::SUMMARY_ORDER`].
pub fn ranked_stats(stats: &FeatureStats) -> [PercentageStat; 3] {
    let mut ranked = Feature::SUMMARY_ORDER.map(|f| PercentageStat::of(f, stats));
    // slice::sort_by is stable
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked
}

/// Everything the summary slots display, derived from the latest snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Status line, "Last run {Month D, YYYY}".
    pub last_run: String,
    /// Listening nodes, comma-grouped.
    pub total_nodes: String,
    /// Contacted peers, comma-grouped.
    pub total_contacted: String,
    /// Feature percentages, highest first.
    pub ranked: [PercentageStat; 3],
}

impl Summary {
    pub fn from_latest(latest: &Snapshot) -> Self {
        Self {
            last_run: format!("Last run {}", long_date(latest.timestamp)),
            total_nodes: group_thousands(latest.stats.total_nodes),
            total_contacted: group_thousands(latest.total_contacted),
            ranked: ranked_stats(&latest.stats),
        }
    }
}
