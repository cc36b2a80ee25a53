use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Crosshair
        KeyCode::Left | KeyCode::Char('h') => app.cursor_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.cursor_next(),
        KeyCode::Home => app.cursor_first(),
        KeyCode::End => app.cursor_last(),

        // Focus
        KeyCode::Tab | KeyCode::BackTab => app.focus_next(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
