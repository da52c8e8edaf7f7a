use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};

/// Events that the picker can handle.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press event.
    Key(KeyEvent),
    /// A mouse event (clicks are hit-tested against the layout).
    Mouse(MouseEvent),
    /// The terminal window gained focus.
    FocusGained,
    /// The terminal window lost focus.
    FocusLost,
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick; drives the focus debounce.
    Tick,
}

/// Polls for terminal events with a configurable tick rate.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Block until the next event or the tick timeout.
    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            Ok(translate(event::read()?))
        } else {
            Ok(AppEvent::Tick)
        }
    }
}

fn translate(event: CrosstermEvent) -> AppEvent {
    match event {
        // Release/repeat events show up on some platforms; only presses count.
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
        CrosstermEvent::Mouse(mouse) => AppEvent::Mouse(mouse),
        CrosstermEvent::FocusGained => AppEvent::FocusGained,
        CrosstermEvent::FocusLost => AppEvent::FocusLost,
        CrosstermEvent::Resize(w, h) => AppEvent::Resize(w, h),
        _ => AppEvent::Tick,
    }
}
