//! Common UI components.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the header bar with the status slot.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status_style = if app.has_error() {
        Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD)
    } else {
        app.theme.dim
    };

    let line = Line::from(vec![
        Span::styled(" NODE CENSUS ", app.theme.header),
        Span::raw("│ "),
        Span::styled(app.status().to_string(), status_style),
        Span::raw(" │ "),
        Span::styled(app.source_description().to_string(), app.theme.dim),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows the crosshair readout for the focused chart and its linked
/// charts, followed by the controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let readout = app.crosshair_readout();
    let status = if readout.is_empty() {
        " ?:help q:quit".to_string()
    } else {
        format!(" {} │ ←→:move Tab:focus ?:help q:quit", readout.join(" │ "))
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Crosshair",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Previous/next snapshot"),
        Line::from("  Home/End    Oldest/latest snapshot"),
        Line::from("  Tab         Switch focused chart"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ?           Toggle help"),
        Line::from("  q Esc       Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 15u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
