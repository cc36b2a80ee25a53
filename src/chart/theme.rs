//! ECharts style presets.
//!
//! A set of default options and a default line style that every chart
//! spreads its own overrides over.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::ChartOption;

/// Base16 "Ashes" palette.
const ASHES: [&str; 8] = [
    "#C7AE95", "#95C7AE", "#AE95C7", "#C79595", "#95AEC7", "#AEC795", "#C795AE", "#AEB3B8",
];
const ASHES_FG: &str = "#C7CCD1";
const ASHES_DIM: &str = "#747C84";
const ASHES_LINE: &str = "#393F45";
const ASHES_BG: &str = "#1C2023";

/// Default chart options and series style.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EchartsTheme {
    /// Top-level option defaults (`DEFAULT_OPTIONS`).
    pub options: Value,
    /// Defaults spread into every line series (`DEFAULT_LINE_STYLE`).
    pub line_style: Value,
}

impl Default for EchartsTheme {
    fn default() -> Self {
        Self::ashes()
    }
}

impl EchartsTheme {
    /// The built-in Base16 Ashes theme.
    pub fn ashes() -> Self {
        let axis = json!({
            "axisLine": { "lineStyle": { "color": ASHES_DIM } },
            "axisLabel": { "color": ASHES_FG },
            "splitLine": { "lineStyle": { "color": ASHES_LINE } },
            "nameTextStyle": { "color": ASHES_FG }
        });

        Self {
            options: json!({
                "backgroundColor": "transparent",
                "color": ASHES,
                "textStyle": { "color": ASHES_FG },
                "grid": { "left": 64, "right": 24, "top": 48, "bottom": 56 },
                "tooltip": {
                    "trigger": "axis",
                    "backgroundColor": ASHES_BG,
                    "borderColor": ASHES_LINE,
                    "textStyle": { "color": ASHES_FG }
                },
                "legend": { "bottom": 0, "textStyle": { "color": ASHES_FG } },
                "toolbox": { "feature": { "brush": { "type": ["lineX", "clear"] } } },
                "brush": { "xAxisIndex": "all", "brushLink": "all" },
                "xAxis": axis.clone(),
                "yAxis": axis
            }),
            line_style: json!({
                "type": "line",
                "smooth": false,
                "showSymbol": false,
                "lineStyle": { "width": 2 }
            }),
        }
    }

    /// Load a theme from a JSON file of the form
    /// `{"options": {...}, "line_style": {...}}`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse theme {}", path.display()))
    }

    /// Merge a chart's overrides into the theme defaults.
    ///
    /// Top-level keys come from the default options; `xAxis` and `yAxis`
    /// spread the chart's axis over the default axis; each series spreads
    /// over the default line style. Spreading is shallow.
    pub fn apply(&self, option: &ChartOption) -> Result<Value, serde_json::Error> {
        let mut merged = match &self.options {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };

        let x_axis = spread(self.options.get("xAxis"), serde_json::to_value(&option.x_axis)?);
        let y_axis = spread(self.options.get("yAxis"), serde_json::to_value(&option.y_axis)?);
        let series = option
            .series
            .iter()
            .map(|s| Ok(spread(Some(&self.line_style), serde_json::to_value(s)?)))
            .collect::<Result<Vec<_>, serde_json::Error>>()?;

        merged.insert("xAxis".to_string(), x_axis);
        merged.insert("yAxis".to_string(), y_axis);
        merged.insert("series".to_string(), Value::Array(series));
        Ok(Value::Object(merged))
    }
}

/// Shallow object spread, `{...base, ...overrides}`.
///
/// A non-object on either side yields `overrides` unchanged.
pub fn spread(base: Option<&Value>, overrides: Value) -> Value {
    match (base, overrides) {
        (Some(Value::Object(base)), Value::Object(overrides)) => {
            let mut out = base.clone();
            out.extend(overrides);
            Value::Object(out)
        }
        (_, overrides) => overrides,
    }
}
