use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::app::App;

/// Poll for keyboard events with timeout
pub fn poll_event(timeout_ms: u64) -> anyhow::Result<Option<Event>> {
    if event::poll(Duration::from_millis(timeout_ms))? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// The board is passive; only quit and manual refresh are bound.
pub fn handle_event(app: &mut App, event: Event, refresh: &mpsc::Sender<()>) {
    let Event::Key(key) = event else {
        return;
    };
    // Only handle key press events (not release)
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('r') => {
            // a refresh already queued is enough
            let _ = refresh.try_send(());
        }
        _ => {}
    }
}
