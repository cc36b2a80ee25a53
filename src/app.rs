//! Terminal view state.
//!
//! [`App`] is the terminal adapter for the render pipeline: its
//! [`PageText`] receives the slot text and its [`ChartDeck`] receives the
//! charts. Linked charts share one crosshair.

use crate::chart::{ChartBackend, ChartHandle, ChartOption, ChartSlot, YValue};
use crate::data::format::{group_thousands, short_date};
use crate::page::{PageText, Slot};
use crate::ui::Theme;

/// A chart held by the deck, with its points ready for drawing.
#[derive(Debug, Clone)]
pub struct DeckChart {
    pub slot: ChartSlot,
    pub option: ChartOption,
    /// `(x, y)` points per series, x in milliseconds.
    pub points: Vec<Vec<(f64, f64)>>,
    /// Index of the point under the crosshair.
    pub cursor: usize,
}

impl DeckChart {
    fn new(slot: ChartSlot, option: ChartOption) -> Self {
        let points = option
            .series
            .iter()
            .map(|s| s.data.iter().map(|p| (p.x() as f64, p.y().as_f64())).collect())
            .collect();
        let cursor = option.point_count().saturating_sub(1);
        Self {
            slot,
            option,
            points,
            cursor,
        }
    }

    /// X value (milliseconds) under the crosshair.
    pub fn cursor_x(&self) -> Option<u64> {
        self.option
            .series
            .first()
            .and_then(|s| s.data.get(self.cursor))
            .map(|p| p.x())
    }

    /// Index of the point whose x is closest to `x`.
    fn nearest(&self, x: u64) -> Option<usize> {
        self.option
            .series
            .first()?
            .data
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| p.x().abs_diff(x))
            .map(|(idx, _)| idx)
    }

    fn last_index(&self) -> usize {
        self.option.point_count().saturating_sub(1)
    }
}

/// Chart backend for the terminal view.
#[derive(Debug, Clone, Default)]
pub struct ChartDeck {
    charts: Vec<DeckChart>,
    groups: Vec<Vec<usize>>,
}

impl ChartDeck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charts(&self) -> &[DeckChart] {
        &self.charts
    }

    pub fn get(&self, handle: ChartHandle) -> Option<&DeckChart> {
        self.charts.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Charts sharing a link group with `index`, `index` included.
    pub fn linked_with(&self, index: usize) -> Vec<usize> {
        let mut linked = vec![index];
        for group in self.groups.iter().filter(|g| g.contains(&index)) {
            for &member in group {
                if !linked.contains(&member) {
                    linked.push(member);
                }
            }
        }
        linked
    }

    /// Move the crosshair of chart `index` to `position` (clamped) and
    /// carry it to every linked chart.
    pub fn set_cursor(&mut self, index: usize, position: usize) {
        let Some(chart) = self.charts.get_mut(index) else {
            return;
        };
        chart.cursor = position.min(chart.last_index());
        let Some(x) = chart.cursor_x() else {
            return;
        };

        for peer in self.linked_with(index).into_iter().skip(1) {
            if let Some(peer_chart) = self.charts.get_mut(peer) {
                if let Some(nearest) = peer_chart.nearest(x) {
                    peer_chart.cursor = nearest;
                }
            }
        }
    }

    /// Step the crosshair of chart `index` by `delta` points.
    pub fn move_cursor(&mut self, index: usize, delta: isize) {
        let Some(chart) = self.charts.get(index) else {
            return;
        };
        let position = chart.cursor.saturating_add_signed(delta);
        self.set_cursor(index, position);
    }
}

impl ChartBackend for ChartDeck {
    fn render(&mut self, container: ChartSlot, option: ChartOption) -> ChartHandle {
        self.charts.push(DeckChart::new(container, option));
        ChartHandle(self.charts.len() - 1)
    }

    fn link(&mut self, handles: &[ChartHandle]) {
        let group: Vec<usize> = handles
            .iter()
            .map(|h| h.0)
            .filter(|&idx| idx < self.charts.len())
            .collect();
        if group.len() > 1 {
            // Align everyone on the first chart's crosshair
            let first = group[0];
            self.groups.push(group);
            let cursor = self.charts[first].cursor;
            self.set_cursor(first, cursor);
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    /// Slot text written by the renderer.
    pub page: PageText,
    /// Charts drawn by the renderer.
    pub charts: ChartDeck,
    /// Index of the chart that receives crosshair keys.
    pub focus: usize,

    source_description: String,

    // UI
    pub theme: Theme,
}

impl App {
    /// Create an empty app for the given source.
    pub fn new(source_description: &str, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            page: PageText::new(),
            charts: ChartDeck::new(),
            focus: 0,
            source_description: source_description.to_string(),
            theme,
        }
    }

    /// Returns a description of the census source.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// Status slot text, or a placeholder before anything was written.
    pub fn status(&self) -> &str {
        self.page.get(Slot::LastRun).unwrap_or("Loading...")
    }

    /// True when the status slot holds an error.
    pub fn has_error(&self) -> bool {
        self.status().starts_with("Error:")
    }

    /// Move focus to the next chart.
    pub fn focus_next(&mut self) {
        if !self.charts.is_empty() {
            self.focus = (self.focus + 1) % self.charts.len();
        }
    }

    /// Move the crosshair one point left.
    pub fn cursor_prev(&mut self) {
        self.charts.move_cursor(self.focus, -1);
    }

    /// Move the crosshair one point right.
    pub fn cursor_next(&mut self) {
        self.charts.move_cursor(self.focus, 1);
    }

    /// Jump the crosshair to the oldest snapshot.
    pub fn cursor_first(&mut self) {
        self.charts.set_cursor(self.focus, 0);
    }

    /// Jump the crosshair to the latest snapshot.
    pub fn cursor_last(&mut self) {
        self.charts.set_cursor(self.focus, usize::MAX);
    }

    /// One line per chart linked with the focused chart, giving the values
    /// under the crosshair.
    pub fn crosshair_readout(&self) -> Vec<String> {
        if self.charts.is_empty() {
            return Vec::new();
        }

        self.charts
            .linked_with(self.focus)
            .into_iter()
            .filter_map(|idx| self.charts.charts().get(idx))
            .map(|chart| {
                let when = chart.cursor_x().map(short_date).unwrap_or_default();
                let formatter = chart
                    .option
                    .y_axis
                    .axis_label
                    .as_ref()
                    .map(|l| l.formatter.as_str())
                    .unwrap_or("{value}");
                let values: Vec<String> = chart
                    .option
                    .values_at(chart.cursor)
                    .into_iter()
                    .map(|(name, y)| {
                        let value = match y {
                            YValue::Count(n) => group_thousands(n),
                            YValue::Percent(p) => format!("{:.1}", p),
                        };
                        format!("{} {}", name, formatter.replace("{value}", &value))
                    })
                    .collect();
                format!("{} @ {}: {}", chart.slot.title(), when, values.join(", "))
            })
            .collect()
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
