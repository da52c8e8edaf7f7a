use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::ui::layout::{chip_label, PickerLayout, REMOVE_GLYPH};

/// Bordered box with the chips followed by the text input.
pub fn render(frame: &mut Frame, app: &App, layout: &PickerLayout) {
    let theme = &app.theme;
    let border = if app.widget.has_focus() {
        theme.active_panel()
    } else {
        theme.inactive_panel()
    };

    let block = Block::default()
        .title(format!(" {} ", app.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.bg()));
    frame.render_widget(block, layout.chip_box);

    let highlight = app.widget.highlight();
    for hit in &layout.chips {
        let Some(chip) = app.widget.chips().get(hit.index) else {
            continue;
        };
        let highlighted = highlight == Some(hit.index);

        let (body_style, glyph_style) = if highlighted {
            (
                Style::default()
                    .fg(theme.fg_white())
                    .bg(theme.danger())
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(theme.fg_white()).bg(theme.danger()),
            )
        } else {
            (
                Style::default().fg(theme.chip_fg()).bg(theme.chip_bg()),
                Style::default().fg(theme.danger()).bg(theme.chip_bg()),
            )
        };

        frame.render_widget(
            Paragraph::new(Span::styled(chip_label(chip), body_style)),
            hit.body,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(REMOVE_GLYPH, glyph_style)),
            hit.remove,
        );
    }

    if layout.input.is_empty() {
        return;
    }
    let input = if app.widget.input().is_empty() {
        Span::styled(
            app.widget.config().placeholder.as_str(),
            Style::default()
                .fg(theme.muted())
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(app.widget.input(), Style::default().fg(theme.fg_bright()))
    };
    frame.render_widget(Paragraph::new(input), layout.input);
}
