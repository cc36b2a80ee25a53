//! Chart configurations and the charting backend port.
//!
//! The renderer only describes what each chart shows: axis overrides and
//! series data. Styling defaults and the drawing itself belong to a
//! [`ChartBackend`]: the HTML page hands the options to ECharts, the
//! terminal view draws them with ratatui.

pub mod theme;

pub use theme::EchartsTheme;

use serde::{Serialize, Serializer};

use crate::data::{Census, Feature};

/// Named chart container in the page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartSlot {
    Nodes,
    Features,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 2] = [ChartSlot::Nodes, ChartSlot::Features];

    /// Element id of the container.
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartSlot::Nodes => "nodes-chart",
            ChartSlot::Features => "features-chart",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartSlot::Nodes => "Listening Nodes",
            ChartSlot::Features => "Feature Adoption",
        }
    }
}

/// Handle to a chart a backend has rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub usize);

/// Trait for drawing chart options.
///
/// Implementations are handed fully built options and decide how they
/// reach the screen.
pub trait ChartBackend {
    /// Draw `option` into `container` and return a handle to the chart.
    fn render(&mut self, container: ChartSlot, option: ChartOption) -> ChartHandle;

    /// Synchronize hover and brush selection across the given charts.
    fn link(&mut self, handles: &[ChartHandle]);
}

/// Axis type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Time,
    Value,
}

/// Axis label formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisLabel {
    /// Template where `{value}` is replaced by the tick value.
    pub formatter: String,
}

/// Overrides for one axis; theme defaults fill in the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type")]
    pub kind: AxisKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label: Option<AxisLabel>,
}

impl Axis {
    pub fn time() -> Self {
        Self {
            kind: AxisKind::Time,
            name: None,
            axis_label: None,
        }
    }

    pub fn value(name: &str) -> Self {
        Self {
            kind: AxisKind::Value,
            name: Some(name.to_string()),
            axis_label: None,
        }
    }

    pub fn with_label_format(mut self, formatter: &str) -> Self {
        self.axis_label = Some(AxisLabel {
            formatter: formatter.to_string(),
        });
        self
    }
}

/// Y value of a data point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YValue {
    /// Plain count, serialized as a number.
    Count(u64),
    /// Percentage, serialized as a one-decimal string ("40.0").
    Percent(f64),
}

impl YValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            YValue::Count(n) => n as f64,
            YValue::Percent(p) => p,
        }
    }
}

impl Serialize for YValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            YValue::Count(n) => serializer.serialize_u64(n),
            YValue::Percent(p) => serializer.collect_str(&format_args!("{:.1}", p)),
        }
    }
}

/// `[x, y]` pair; x is a timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataPoint(pub u64, pub YValue);

impl DataPoint {
    pub fn x(&self) -> u64 {
        self.0
    }

    pub fn y(&self) -> YValue {
        self.1
    }
}

/// A named line series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub data: Vec<DataPoint>,
}

/// Everything a chart needs beyond the theme defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOption {
    #[serde(rename = "xAxis")]
    pub x_axis: Axis,
    #[serde(rename = "yAxis")]
    pub y_axis: Axis,
    pub series: Vec<LineSeries>,
}

impl ChartOption {
    /// Number of points in the longest series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.data.len()).max().unwrap_or(0)
    }

    /// Value of every series at point `index`, as `(series name, y)`.
    pub fn values_at(&self, index: usize) -> Vec<(&str, YValue)> {
        self.series
            .iter()
            .filter_map(|s| s.data.get(index).map(|p| (s.name.as_str(), p.y())))
            .collect()
    }
}

/// Listening nodes over time.
pub fn nodes_chart(census: &Census) -> ChartOption {
    let data = census
        .snapshots()
        .iter()
        .map(|s| DataPoint(s.timestamp_ms(), YValue::Count(s.stats.total_nodes)))
        .collect();

    ChartOption {
        x_axis: Axis::time(),
        y_axis: Axis::value("Listening Nodes"),
        series: vec![LineSeries {
            name: "Listening Nodes".to_string(),
            data,
        }],
    }
}

/// Feature adoption percentages over time.
pub fn features_chart(census: &Census) -> ChartOption {
    let series = Feature::CHART_ORDER
        .iter()
        .map(|feature| LineSeries {
            name: feature.series_name().to_string(),
            data: census
                .snapshots()
                .iter()
                .map(|s| DataPoint(s.timestamp_ms(), YValue::Percent(feature.share(&s.stats))))
                .collect(),
        })
        .collect();

    ChartOption {
        x_axis: Axis::time(),
        y_axis: Axis::value("Adoption %").with_label_format("{value}%"),
        series,
    }
}
