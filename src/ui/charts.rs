//! Line chart rendering.
//!
//! Draws every chart in the deck stacked vertically. The focused chart gets
//! a highlighted border, and all charts show their crosshair as a vertical
//! line at the point under the cursor.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis as ChartAxis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::{App, DeckChart};
use crate::data::format::{group_thousands, short_date};

/// Number of y-axis labels.
const Y_TICKS: usize = 4;

/// Render all charts in `area`.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let charts = app.charts.charts();
    if charts.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(app.theme.chart_border(false));
        let paragraph = Paragraph::new(Span::styled("No chart data", app.theme.dim)).block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let areas = Layout::vertical(vec![Constraint::Fill(1); charts.len()]).split(area);
    for (idx, (chart, cell)) in charts.iter().zip(areas.iter()).enumerate() {
        render_chart(frame, app, chart, idx == app.focus, *cell);
    }
}

fn render_chart(frame: &mut Frame, app: &App, chart: &DeckChart, focused: bool, area: Rect) {
    let (x_min, x_max) = x_bounds(chart);
    let (y_min, y_max) = y_bounds(chart);

    let crosshair = chart
        .cursor_x()
        .map(|x| vec![(x as f64, y_min), (x as f64, y_max)])
        .unwrap_or_default();

    let mut datasets: Vec<Dataset> = chart
        .option
        .series
        .iter()
        .zip(chart.points.iter())
        .enumerate()
        .map(|(idx, (series, points))| {
            Dataset::default()
                .name(series.name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(app.theme.series_color(idx)))
                .data(points)
        })
        .collect();
    if !crosshair.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(app.theme.crosshair))
                .data(&crosshair),
        );
    }

    let title_style = if focused {
        app.theme.header
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let block = Block::default()
        .title(Span::styled(format!(" {} ", chart.slot.title()), title_style))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.chart_border(focused));

    let x_axis = ChartAxis::default()
        .style(app.theme.dim)
        .bounds([x_min, x_max])
        .labels(vec![short_date(x_min as u64), short_date(x_max as u64)]);

    let y_axis = ChartAxis::default()
        .title(chart.option.y_axis.name.clone().unwrap_or_default())
        .style(app.theme.dim)
        .bounds([y_min, y_max])
        .labels(y_labels(chart, y_min, y_max));

    let widget = Chart::new(datasets).block(block).x_axis(x_axis).y_axis(y_axis);
    frame.render_widget(widget, area);
}

/// X range of the chart; a single point gets a one-day window.
fn x_bounds(chart: &DeckChart) -> (f64, f64) {
    let xs = chart.points.iter().flatten().map(|&(x, _)| x);
    let min = xs.clone().fold(f64::INFINITY, f64::min);
    let max = xs.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if max > min {
        (min, max)
    } else {
        (min - 43_200_000.0, max + 43_200_000.0)
    }
}

/// Y range from zero to a little above the largest value.
fn y_bounds(chart: &DeckChart) -> (f64, f64) {
    let max = chart
        .points
        .iter()
        .flatten()
        .map(|&(_, y)| y)
        .fold(0.0, f64::max);
    if max > 0.0 {
        (0.0, max * 1.1)
    } else {
        (0.0, 1.0)
    }
}

/// Evenly spaced y labels, run through the axis label formatter.
fn y_labels(chart: &DeckChart, min: f64, max: f64) -> Vec<String> {
    let formatter = chart
        .option
        .y_axis
        .axis_label
        .as_ref()
        .map(|l| l.formatter.as_str())
        .unwrap_or("{value}");

    (0..Y_TICKS)
        .map(|i| {
            let value = min + (max - min) * i as f64 / (Y_TICKS - 1) as f64;
            formatter.replace("{value}", &group_thousands(value.round() as u64))
        })
        .collect()
}
