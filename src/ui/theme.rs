//! Theme configuration for the terminal view.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the terminal view.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and the focused chart.
    pub highlight: Color,
    /// Color for error text.
    pub error: Color,
    /// Color for the big summary numbers.
    pub value: Color,
    /// Color for borders of unfocused charts.
    pub border: Color,
    /// Color of the crosshair.
    pub crosshair: Color,
    /// Line colors, one per series, cycled.
    pub series: Vec<Color>,
    /// Style for the header line.
    pub header: Style,
    /// Style for axis labels and captions.
    pub dim: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            error: Color::Red,
            value: Color::Yellow,
            border: Color::Gray,
            crosshair: Color::DarkGray,
            series: vec![Color::Cyan, Color::Green, Color::Magenta, Color::Yellow],
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            error: Color::Red,
            value: Color::Magenta,
            border: Color::DarkGray,
            crosshair: Color::Gray,
            series: vec![Color::Blue, Color::Green, Color::Magenta, Color::Red],
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Line color for the n-th series of a chart.
    pub fn series_color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return self.highlight;
        }
        self.series[index % self.series.len()]
    }

    /// Border style for a chart, brighter when focused.
    pub fn chart_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.highlight)
        } else {
            Style::default().fg(self.border)
        }
    }
}
