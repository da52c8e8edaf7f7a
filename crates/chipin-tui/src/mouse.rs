use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::ui::{Hit, PickerLayout};

/// Left clicks, hit-tested against the layout of the last frame.
///
/// Anything but the input takes focus away from it first, as a click
/// elsewhere would. The dropdown stays laid out during the debounce window,
/// so the row under the pointer is still there when the click is applied.
pub(crate) fn handle_mouse(app: &mut App, event: MouseEvent, now: Instant) {
    if event.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    let layout = PickerLayout::compute(app.viewport, &app.widget);
    let hit = layout.hit_test(event.column, event.row);
    tracing::trace!(?hit, column = event.column, row = event.row, "click");

    if hit == Hit::Input {
        app.widget.focus_in();
        return;
    }

    if app.widget.has_focus() {
        app.widget.focus_out(now);
    }

    match hit {
        Hit::Row(i) => {
            app.widget.click_row(i);
        }
        Hit::Chip(i) => {
            app.widget.click_chip(i);
        }
        Hit::Remove(i) => {
            app.widget.click_remove(i);
        }
        Hit::Input | Hit::Outside => {}
    }
}
