//! Terminal rendering with ratatui.
//!
//! The layout is a header line, the summary row, the charts, and a status
//! bar, with the help overlay drawn on top when active.

pub mod charts;
pub mod common;
pub mod summary;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::app::App;

/// Draw the whole dashboard.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(4), // Summary boxes
        Constraint::Min(8),    // Charts
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    summary::render(frame, app, chunks[1]);
    charts::render(frame, app, chunks[2]);
    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
