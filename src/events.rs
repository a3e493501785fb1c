//! Terminal event polling and input handling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};

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
        KeyCode::Char('q') => app.quit(),

        // Time range presets (5 min .. 24 hours)
        KeyCode::Char('1') => app.set_range_preset(0),
        KeyCode::Char('2') => app.set_range_preset(1),
        KeyCode::Char('3') => app.set_range_preset(2),
        KeyCode::Char('4') => app.set_range_preset(3),
        KeyCode::Char('5') => app.set_range_preset(4),

        // Connection actions
        KeyCode::Char('r') => app.retry_connection(),
        KeyCode::Char('m') => app.toggle_mode(),

        // Anomaly log scrolling
        KeyCode::Up | KeyCode::Char('k') => app.scroll_log_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_log_down(1),
        KeyCode::PageUp => app.scroll_log_up(10),
        KeyCode::PageDown => app.scroll_log_down(10),
        KeyCode::Home => app.scroll_log_top(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Esc => {
            app.show_help = false;
        }

        _ => {}
    }
}

/// Handle mouse events (scroll wheel moves through the anomaly log)
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_log_up(1),
        MouseEventKind::ScrollDown => app.scroll_log_down(1),
        _ => {}
    }
}
