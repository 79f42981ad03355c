use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::shutdown::ShutdownSignal;

/// Watch the terminal for quit keys (Esc, q, Ctrl+C) on a background thread.
pub fn spawn_keyboard_monitor(shutdown: Arc<ShutdownSignal>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !shutdown.is_shutdown() {
            if event::poll(Duration::from_millis(100)).unwrap_or(false)
                && let Ok(Event::Key(key)) = event::read()
                && should_shutdown(&key)
            {
                debug!("Quit key pressed: {:?}", key.code);
                shutdown.trigger();
            }
        }
    })
}

fn should_shutdown(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
