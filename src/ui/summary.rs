//! Summary row rendering.
//!
//! Displays the two totals and the three ranked feature stats as a row of
//! boxed values, in the same order as the page layout.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::page::Slot;

/// Placeholder for slots that have not been written.
const EMPTY: &str = "-";

/// `(value slot, caption)` for each box; stat captions come from their
/// label slots.
fn boxes(app: &App) -> Vec<(String, String)> {
    let text = |slot: Slot| app.page.get(slot).unwrap_or(EMPTY).to_string();

    let mut boxes = vec![
        (text(Slot::TotalNodes), "Listening Nodes".to_string()),
        (text(Slot::TotalContacted), "Nodes Contacted".to_string()),
    ];
    for n in 1..=3 {
        boxes.push((text(Slot::StatValue(n)), text(Slot::StatLabel(n))));
    }
    boxes
}

/// Render the summary row.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let boxes = boxes(app);
    let areas = Layout::horizontal(vec![Constraint::Fill(1); boxes.len()]).split(area);

    for ((value, caption), cell) in boxes.into_iter().zip(areas.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));

        let lines = vec![
            Line::styled(
                value,
                Style::default().fg(app.theme.value).add_modifier(Modifier::BOLD),
            ),
            Line::styled(caption, app.theme.dim),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), *cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageTargets;
    use crate::ui::Theme;

    #[test]
    fn test_boxes_before_load() {
        let app = App::new("test", Theme::dark());
        let boxes = boxes(&app);
        assert_eq!(boxes.len(), 5);
        assert!(boxes.iter().all(|(value, _)| value == EMPTY));
        assert_eq!(boxes[0].1, "Listening Nodes");
    }

    #[test]
    fn test_boxes_follow_slots() {
        let mut app = App::new("test", Theme::dark());
        app.page.set_text(Slot::TotalNodes, "1,000");
        app.page.set_text(Slot::StatValue(1), "60.0%");
        app.page.set_text(Slot::StatLabel(1), "V2 Transport");

        let boxes = boxes(&app);
        assert_eq!(boxes[0].0, "1,000");
        assert_eq!(boxes[2], ("60.0%".to_string(), "V2 Transport".to_string()));
    }
}
