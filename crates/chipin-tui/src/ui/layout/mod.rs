use chipin_core::{ChipInput, Contact};
use ratatui::layout::{Position, Rect};
use ratatui::text::Span;

/// Remove glyph drawn after every chip label.
pub const REMOVE_GLYPH: &str = "× ";
/// The text input never gets narrower than this, even after the last chip.
pub const MIN_INPUT_WIDTH: u16 = 12;

/// Screen rectangles of one chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipHit {
    pub index: usize,
    pub body: Rect,
    pub remove: Rect,
}

/// What a click at a screen position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Input,
    Chip(usize),
    Remove(usize),
    Row(usize),
    Outside,
}

/// Geometry of the whole picker for one frame.
///
/// Computed from the area and widget state alone, so rendering and mouse
/// hit-testing always agree on where things are.
#[derive(Debug, Clone, Default)]
pub struct PickerLayout {
    pub header: Rect,
    /// Bordered box holding chips and the text input.
    pub chip_box: Rect,
    pub chips: Vec<ChipHit>,
    pub input: Rect,
    /// Bordered dropdown, present only while the dropdown is visible.
    pub dropdown: Option<Rect>,
    /// One rect per shown dropdown row, indexed like the pool.
    pub rows: Vec<Rect>,
    pub status: Rect,
}

pub fn chip_label(contact: &Contact) -> String {
    format!(" {} {} ", contact.initial(), contact.name)
}

fn text_width(s: &str) -> u16 {
    u16::try_from(Span::raw(s).width()).unwrap_or(u16::MAX)
}

impl PickerLayout {
    pub fn compute(area: Rect, widget: &ChipInput) -> Self {
        let mut layout = Self::default();
        if area.width < 4 || area.height < 4 {
            return layout;
        }

        layout.header = Rect::new(area.x, area.y, area.width, 1);
        layout.status = Rect::new(area.x, area.bottom() - 1, area.width, 1);

        let body_top = area.y + 1;
        let body_height = area.height - 2;
        let inner_x = area.x + 1;
        let inner_width = area.width - 2;

        // Flow chips left to right, wrapping onto new lines.
        let glyph_w = text_width(REMOVE_GLYPH);
        let mut placed: Vec<(usize, u16, u16, u16)> = Vec::new(); // index, line, col, body width
        let (mut line, mut col) = (0u16, 0u16);
        for (index, chip) in widget.chips().iter().enumerate() {
            let body_w = text_width(&chip_label(chip)).min(inner_width.saturating_sub(glyph_w));
            let total = body_w + glyph_w;
            if col > 0 && col + total > inner_width {
                line += 1;
                col = 0;
            }
            placed.push((index, line, col, body_w));
            col += total + 1;
        }

        let shown = if widget.input().is_empty() {
            widget.config().placeholder.as_str()
        } else {
            widget.input()
        };
        let input_need = text_width(shown)
            .saturating_add(1)
            .max(MIN_INPUT_WIDTH)
            .min(inner_width);
        if col > 0 && col + input_need > inner_width {
            line += 1;
            col = 0;
        }
        let input_line = line;
        let input_col = col;

        let box_height = (line + 1 + 2).min(body_height);
        layout.chip_box = Rect::new(area.x, body_top, area.width, box_height);
        let inner_y = body_top + 1;
        let inner_bottom = layout.chip_box.bottom().saturating_sub(1);

        for (index, line, col, body_w) in placed {
            let y = inner_y + line;
            if y >= inner_bottom {
                break;
            }
            let x = inner_x + col;
            layout.chips.push(ChipHit {
                index,
                body: Rect::new(x, y, body_w, 1),
                remove: Rect::new(x + body_w, y, glyph_w, 1),
            });
        }

        let input_y = inner_y + input_line;
        if input_y < inner_bottom {
            layout.input = Rect::new(inner_x + input_col, input_y, inner_width - input_col, 1);
        }

        if widget.dropdown_visible() {
            let top = layout.chip_box.bottom();
            let available = layout.status.y.saturating_sub(top);
            let wanted_rows = widget.pool().len().min(widget.config().max_rows) as u16;
            let height = (wanted_rows.max(1) + 2).min(available);
            if height >= 3 {
                let dropdown = Rect::new(area.x, top, area.width, height);
                let shown_rows = wanted_rows.min(height - 2);
                layout.rows = (0..shown_rows)
                    .map(|i| Rect::new(inner_x, top + 1 + i, inner_width, 1))
                    .collect();
                layout.dropdown = Some(dropdown);
            }
        }

        layout
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Hit {
        let pos = Position::new(column, row);
        if let Some(i) = self.rows.iter().position(|r| r.contains(pos)) {
            return Hit::Row(i);
        }
        for chip in &self.chips {
            if chip.remove.contains(pos) {
                return Hit::Remove(chip.index);
            }
            if chip.body.contains(pos) {
                return Hit::Chip(chip.index);
            }
        }
        if self.input.contains(pos) {
            return Hit::Input;
        }
        Hit::Outside
    }

    /// Terminal cursor position for the text input.
    pub fn cursor_position(&self, widget: &ChipInput) -> Option<Position> {
        if self.input.is_empty() {
            return None;
        }
        let before = &widget.input()[..widget.cursor()];
        let x = self
            .input
            .x
            .saturating_add(text_width(before))
            .min(self.input.right().saturating_sub(1));
        Some(Position::new(x, self.input.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipin_core::{WidgetConfig, WidgetKey};
    use std::time::{Duration, Instant};

    fn widget(names: &[&str]) -> ChipInput {
        ChipInput::from_contacts(
            names
                .iter()
                .map(|n| Contact::new(*n, format!("{}@x.com", n.to_lowercase())))
                .collect(),
            WidgetConfig::default(),
        )
    }

    #[test]
    fn test_empty_widget_layout() {
        let w = widget(&["Ann", "Bob"]);
        let layout = PickerLayout::compute(Rect::new(0, 0, 40, 20), &w);

        assert_eq!(layout.header, Rect::new(0, 0, 40, 1));
        assert_eq!(layout.chip_box, Rect::new(0, 1, 40, 3));
        assert_eq!(layout.input, Rect::new(1, 2, 38, 1));
        assert!(layout.chips.is_empty());
        assert_eq!(layout.dropdown, Some(Rect::new(0, 4, 40, 4)));
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.status, Rect::new(0, 19, 40, 1));
    }

    #[test]
    fn test_chip_body_and_glyph_positions() {
        let mut w = widget(&["Ann", "Bob"]);
        w.click_row(0);
        let layout = PickerLayout::compute(Rect::new(0, 0, 40, 20), &w);

        // " A Ann " is 7 wide, then "× ".
        let chip = layout.chips[0];
        assert_eq!(chip.body, Rect::new(1, 2, 7, 1));
        assert_eq!(chip.remove, Rect::new(8, 2, 2, 1));
        assert_eq!(layout.input.x, 11);

        assert_eq!(layout.hit_test(3, 2), Hit::Chip(0));
        assert_eq!(layout.hit_test(8, 2), Hit::Remove(0));
        assert_eq!(layout.hit_test(20, 2), Hit::Input);
        assert_eq!(layout.hit_test(0, 0), Hit::Outside);
        assert_eq!(layout.hit_test(5, 5), Hit::Row(0));
    }

    #[test]
    fn test_chips_wrap_to_next_line() {
        let mut w = widget(&["Alexandra", "Bartholomew", "Cornelius"]);
        w.click_row(0);
        w.click_row(0);
        w.click_row(0);
        let layout = PickerLayout::compute(Rect::new(0, 0, 30, 20), &w);

        let lines: Vec<u16> = layout.chips.iter().map(|c| c.body.y).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert_eq!(layout.chip_box.height, 6);
        assert!(layout.input.y >= 4);
    }

    #[test]
    fn test_no_rows_when_dropdown_hidden() {
        let t0 = Instant::now();
        let mut w = widget(&["Ann"]);
        w.focus_out(t0);

        // Still inside the debounce window: rows stay clickable.
        let layout = PickerLayout::compute(Rect::new(0, 0, 40, 20), &w);
        assert_eq!(layout.rows.len(), 1);

        w.poll_timers(t0 + Duration::from_millis(300));
        let layout = PickerLayout::compute(Rect::new(0, 0, 40, 20), &w);
        assert!(layout.dropdown.is_none());
        assert!(layout.rows.is_empty());
        assert_eq!(layout.hit_test(5, 5), Hit::Outside);
    }

    #[test]
    fn test_rows_capped_by_max_rows() {
        let names: Vec<String> = (0..20).map(|i| format!("N{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let w = widget(&refs);
        let layout = PickerLayout::compute(Rect::new(0, 0, 40, 40), &w);
        assert_eq!(layout.rows.len(), w.config().max_rows);
    }

    #[test]
    fn test_tiny_area_is_empty() {
        let w = widget(&["Ann"]);
        let layout = PickerLayout::compute(Rect::new(0, 0, 3, 3), &w);
        assert_eq!(layout.hit_test(1, 1), Hit::Outside);
    }

    #[test]
    fn test_very_long_input_does_not_overflow() {
        let mut w = widget(&["Ann"]);
        w.set_input(&"w".repeat(70_000));
        let layout = PickerLayout::compute(Rect::new(0, 0, 40, 20), &w);
        assert_eq!(layout.input.width, 38);
        assert_eq!(layout.cursor_position(&w), Some(Position::new(38, 2)));
    }

    #[test]
    fn test_short_terminal_limits_arrow_rows() {
        let mut w = widget(&["Ann", "Bob"]);
        let layout = PickerLayout::compute(Rect::new(0, 0, 40, 8), &w);
        assert_eq!(layout.rows.len(), 1);
        w.set_row_limit(layout.rows.len());

        w.handle_key(WidgetKey::Down);
        w.handle_key(WidgetKey::Down);
        assert_eq!(w.active_row(), Some(0));
        w.handle_key(WidgetKey::Enter);
        assert_eq!(w.selection(), vec![Contact::new("Ann", "ann@x.com")]);
    }

    #[test]
    fn test_cursor_follows_text() {
        let mut w = widget(&["Ann"]);
        w.insert_char('z');
        let layout = PickerLayout::compute(Rect::new(0, 0, 40, 20), &w);
        assert_eq!(layout.cursor_position(&w), Some(Position::new(2, 2)));
    }
}
