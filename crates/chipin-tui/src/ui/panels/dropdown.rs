use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::App;
use crate::ui::layout::PickerLayout;

/// Candidate rows under the chip box. Only drawn while the dropdown is visible.
pub fn render(frame: &mut Frame, app: &App, layout: &PickerLayout, area: Rect) {
    let theme = &app.theme;
    frame.render_widget(Clear, area);

    let pool = app.widget.pool();
    let title = format!(" {} match{} ", pool.len(), if pool.len() == 1 { "" } else { "es" });
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border()))
        .style(Style::default().bg(theme.bg()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if pool.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "  No matches",
                Style::default().fg(theme.muted()),
            )),
            inner,
        );
        return;
    }

    let active = app.widget.active_row();
    for (i, row) in layout.rows.iter().enumerate() {
        let Some(contact) = pool.get(i) else {
            break;
        };
        let is_active = active == Some(i);
        let (name_style, email_style, bg) = if is_active {
            (
                Style::default().fg(theme.fg_white()).add_modifier(Modifier::BOLD),
                Style::default().fg(theme.fg_bright()),
                theme.row_active_bg(),
            )
        } else {
            (
                Style::default().fg(theme.fg()).add_modifier(Modifier::BOLD),
                Style::default().fg(theme.frost_mint()),
                theme.bg(),
            )
        };

        let line = Line::from(vec![
            Span::styled(if is_active { "▶ " } else { "  " }, Style::default().fg(theme.frost_ice())),
            Span::styled(format!("({}) ", contact.initial()), Style::default().fg(theme.muted())),
            Span::styled(contact.name.as_str(), name_style),
            Span::raw("  "),
            Span::styled(contact.email.as_str(), email_style),
        ]);
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), *row);
    }

    let hidden = pool.len().saturating_sub(layout.rows.len());
    if hidden > 0 {
        let more = Line::from(Span::styled(
            format!(" +{hidden} more "),
            Style::default().fg(theme.muted()).add_modifier(Modifier::DIM),
        ));
        let footer = Rect::new(area.x + 1, area.bottom() - 1, area.width.saturating_sub(2), 1);
        frame.render_widget(Paragraph::new(more).alignment(Alignment::Right), footer);
    }
}
