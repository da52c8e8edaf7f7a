
use std::time::Instant;

use chipin_core::WidgetKey;
use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::App;

pub(crate) fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers, now: Instant) {
    // ─── Session keys, regardless of focus ────────────────────────
    // Ctrl+Alt is how AltGr arrives on Windows; those are plain characters.
    if modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT) {
        match code {
            KeyCode::Char('c') => app.cancel(),
            KeyCode::Char('s') => app.submit(),
            _ => {}
        }
        return;
    }

    if app.widget.has_focus() {
        handle_focused(app, code, modifiers, now);
    } else {
        handle_unfocused(app, code);
    }
}

/// Keys typed into the text input.
fn handle_focused(app: &mut App, code: KeyCode, modifiers: KeyModifiers, now: Instant) {
    let key = match code {
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => {
            app.widget.focus_out(now);
            return;
        }
        KeyCode::Char(c) if !is_alt_chord(modifiers) => WidgetKey::Char(c),
        KeyCode::Backspace => WidgetKey::Backspace,
        KeyCode::Enter => WidgetKey::Enter,
        KeyCode::Up => WidgetKey::Up,
        KeyCode::Down => WidgetKey::Down,
        KeyCode::Left => WidgetKey::Left,
        KeyCode::Right => WidgetKey::Right,
        KeyCode::Home => WidgetKey::Home,
        KeyCode::End => WidgetKey::End,
        _ => return,
    };
    app.widget.handle_key(key);
}

fn is_alt_chord(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::ALT) && !modifiers.contains(KeyModifiers::CONTROL)
}

/// Keys while the input does not hold focus.
fn handle_unfocused(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('i') | KeyCode::Tab => app.widget.focus_in(),
        KeyCode::Enter => app.submit(),
        KeyCode::Char('q') | KeyCode::Esc => app.cancel(),
        _ => {}
    }
}
