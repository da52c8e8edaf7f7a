pub mod app;
pub mod event;
pub mod keys;
pub mod mouse;
pub mod terminal;
pub mod theme;
pub mod ui;

use std::time::Instant;

use anyhow::Result;

use app::{App, Outcome};
use event::{AppEvent, EventHandler};
use terminal::TerminalGuard;

/// Run the interactive picker until the user submits or cancels.
pub fn run_picker(app: &mut App) -> Result<Outcome> {
    let mut guard = TerminalGuard::enter(app.config.ui.mouse)?;
    let event_handler = EventHandler::new(app.config.ui.tick_rate());
    tracing::info!(candidates = app.widget.candidates().len(), "picker started");

    // Main loop
    loop {
        let area = guard.terminal_mut().draw(|frame| ui::render(frame, app))?.area;
        app.sync_layout(area);

        match event_handler.next()? {
            AppEvent::Key(key) => keys::handle_key(app, key.code, key.modifiers, Instant::now()),
            AppEvent::Mouse(mouse) => mouse::handle_mouse(app, mouse, Instant::now()),
            AppEvent::FocusGained => app.widget.focus_in(),
            AppEvent::FocusLost => app.widget.focus_out(Instant::now()),
            AppEvent::Resize(_, _) | AppEvent::Tick => {}
        }

        app.widget.poll_timers(Instant::now());

        if app.should_quit {
            break;
        }
    }

    drop(guard);
    let outcome = app.outcome.unwrap_or(Outcome::Cancelled);
    tracing::info!(?outcome, selected = app.widget.chips().len(), "picker finished");
    Ok(outcome)
}
