use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),    // hints / messages
            Constraint::Length(14), // selection count
        ])
        .split(area);

    render_left_zone(frame, app, chunks[0]);
    render_count_zone(frame, app, chunks[1]);
}

fn render_left_zone(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let widget = &app.widget;

    let content = if let Some(chip) = widget.highlight().and_then(|i| widget.chips().get(i)) {
        Line::from(Span::styled(
            format!(" Backspace again to remove {}", chip.name),
            Style::default().fg(theme.warning()).add_modifier(Modifier::BOLD),
        ))
    } else if !widget.has_focus() {
        hints(app, &[("i", "edit"), ("Enter", "done"), ("q", "cancel")])
    } else if let Some(message) = app.last_change() {
        Line::from(vec![
            Span::styled(format!(" {message}"), Style::default().fg(theme.success())),
            Span::styled("  ^S done  Esc blur", Style::default().fg(theme.muted())),
        ])
    } else {
        hints(app, &[("↑↓", "pick"), ("Enter", "add"), ("⌫⌫", "remove"), ("^S", "done"), ("^C", "cancel")])
    };

    frame.render_widget(
        Paragraph::new(content).style(Style::default().bg(theme.bg_secondary())),
        area,
    );
}

fn hints<'a>(app: &App, pairs: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = vec![Span::raw(" ")];
    for (key, action) in pairs {
        spans.push(Span::styled(
            *key,
            Style::default().fg(app.theme.frost_ice()).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {action}  "),
            Style::default().fg(app.theme.muted()),
        ));
    }
    Line::from(spans)
}

fn render_count_zone(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.widget.chips().len();
    let content = Line::from(Span::styled(
        format!("{count} selected"),
        Style::default().fg(app.theme.success()),
    ));
    frame.render_widget(
        Paragraph::new(content)
            .style(Style::default().bg(app.theme.bg_secondary()))
            .alignment(Alignment::Center),
        area,
    );
}
