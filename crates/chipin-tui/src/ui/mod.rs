pub(crate) mod layout;
pub(crate) mod panels;

use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;
pub use layout::{Hit, PickerLayout};

/// Render the entire picker.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg())), area);

    let layout = PickerLayout::compute(area, &app.widget);
    if layout.header.is_empty() {
        return;
    }

    render_header(frame, app, &layout);
    panels::chip_box::render(frame, app, &layout);
    if let Some(dropdown) = layout.dropdown {
        panels::dropdown::render(frame, app, &layout, dropdown);
    }
    panels::statusbar::render(frame, app, layout.status);

    if app.widget.has_focus() {
        if let Some(pos) = layout.cursor_position(&app.widget) {
            frame.set_cursor_position(pos);
        }
    }
}

fn render_header(frame: &mut Frame, app: &App, layout: &PickerLayout) {
    let header = Line::from(vec![
        Span::styled(
            " chipin ",
            Style::default()
                .fg(app.theme.frost_ice())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" › ", Style::default().fg(app.theme.muted())),
        Span::styled(app.title.as_str(), Style::default().fg(app.theme.frost_mint())),
    ]);
    frame.render_widget(
        Paragraph::new(header).style(Style::default().bg(app.theme.bg_secondary())),
        layout.header,
    );
}
