use std::cell::RefCell;
use std::rc::Rc;

use chipin_core::{AppConfig, ChipEvent, ChipInput, Contact};
use ratatui::layout::Rect;

use crate::theme::Theme;
use crate::ui::PickerLayout;

/// How a picker session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Submitted,
    Cancelled,
}

/// Main application state for one picker session.
pub struct App {
    pub widget: ChipInput,
    pub config: AppConfig,
    pub theme: Theme,
    pub title: String,
    pub should_quit: bool,
    pub outcome: Option<Outcome>,
    /// Area of the last drawn frame; mouse clicks are hit-tested against it.
    pub viewport: Rect,
    /// Most recent chip change, written by the widget's change listener.
    last_change: Rc<RefCell<Option<String>>>,
}

impl App {
    pub fn new(contacts: Vec<Contact>, config: AppConfig) -> Self {
        let theme = Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.ui.theme, "unknown theme, using nord");
            Theme::default()
        });

        let mut widget = ChipInput::from_contacts(contacts, config.widget.clone());
        let last_change: Rc<RefCell<Option<String>>> = Rc::default();
        let sink = last_change.clone();
        widget.on_change(move |change| {
            let message = match &change.event {
                ChipEvent::Added(c) => format!("Added {}", c.name),
                ChipEvent::Removed(c) => format!("Removed {}", c.name),
            };
            tracing::info!(selected = change.chips.len(), "{message}");
            *sink.borrow_mut() = Some(message);
        });

        Self {
            widget,
            config,
            theme,
            title: "Recipients".to_string(),
            should_quit: false,
            outcome: None,
            viewport: Rect::default(),
            last_change,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn submit(&mut self) {
        self.outcome = Some(Outcome::Submitted);
        self.should_quit = true;
    }

    pub fn cancel(&mut self) {
        self.outcome = Some(Outcome::Cancelled);
        self.should_quit = true;
    }

    /// Record the frame area and cap arrow-key rows to the dropdown rows
    /// that fit in it.
    pub fn sync_layout(&mut self, area: Rect) {
        self.viewport = area;
        let layout = PickerLayout::compute(area, &self.widget);
        self.widget.set_row_limit(layout.rows.len());
    }

    pub fn last_change(&self) -> Option<String> {
        self.last_change.borrow().clone()
    }

    /// Final selection, in selection order.
    pub fn selection(&self) -> Vec<Contact> {
        self.widget.selection()
    }
}

/// Two-contact app shared by the TUI tests.
#[cfg(test)]
pub(crate) fn sample_app() -> App {
    App::new(
        vec![
            Contact::new("Ann", "ann@x.com"),
            Contact::new("Bob", "bob@x.com"),
        ],
        AppConfig::default(),
    )
}
