//! The chip input: a text field that filters a fixed contact list, turns
//! picked contacts into chips, and removes chips by click or by a two-step
//! Backspace.
//!
//! All state of one instance lives in [`ChipInput`]. Hosts feed it key,
//! click and focus events, call [`ChipInput::poll_timers`] regularly, and
//! read back the pool, chips, highlight and dropdown visibility to render.

mod gesture;
mod text;

pub use gesture::{DeleteGesture, GestureStep};
pub use text::TextField;

use std::sync::Arc;
use std::time::Instant;

use crate::chips::ChipList;
use crate::config::WidgetConfig;
use crate::filter::{exact_match, filter};
use crate::focus::FocusTracker;
use crate::models::Contact;

/// Keys the widget understands, independent of any terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKey {
    Char(char),
    Backspace,
    Enter,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

/// A chip mutation, delivered to change listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipEvent {
    Added(Arc<Contact>),
    Removed(Arc<Contact>),
}

/// Passed to listeners after the chip list changed.
#[derive(Debug)]
pub struct ChipChange<'a> {
    pub event: ChipEvent,
    pub chips: &'a [Arc<Contact>],
}

pub type ChangeListener = Box<dyn FnMut(&ChipChange<'_>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct ChipInput {
    candidates: Vec<Arc<Contact>>,
    pool: Vec<Arc<Contact>>,
    chips: ChipList,
    text: TextField,
    gesture: DeleteGesture,
    /// Dropdown row picked with Up/Down, committed by Enter.
    active_row: Option<usize>,
    /// Rows the host actually draws, when fewer than `max_rows` fit.
    row_limit: Option<usize>,
    focus: FocusTracker,
    config: WidgetConfig,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener: u64,
}

impl std::fmt::Debug for ChipInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChipInput")
            .field("input", &self.text.value())
            .field("chips", &self.chips.len())
            .field("pool", &self.pool.len())
            .field("gesture", &self.gesture)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

impl ChipInput {
    /// Mount a widget over `candidates`. It starts focused, with every
    /// candidate in the pool and no chips.
    pub fn new(candidates: Vec<Arc<Contact>>, config: WidgetConfig) -> Self {
        let mut focus = FocusTracker::new(config.debounce());
        focus.focus_in();
        Self {
            pool: candidates.clone(),
            candidates,
            chips: ChipList::new(),
            text: TextField::new(),
            gesture: DeleteGesture::Idle,
            active_row: None,
            row_limit: None,
            focus,
            config,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn from_contacts(contacts: Vec<Contact>, config: WidgetConfig) -> Self {
        Self::new(contacts.into_iter().map(Arc::new).collect(), config)
    }

    // ── Read access ────────────────────────────────

    pub fn candidates(&self) -> &[Arc<Contact>] {
        &self.candidates
    }

    pub fn pool(&self) -> &[Arc<Contact>] {
        &self.pool
    }

    pub fn chips(&self) -> &ChipList {
        &self.chips
    }

    pub fn input(&self) -> &str {
        self.text.value()
    }

    pub fn text(&self) -> &TextField {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.text.cursor()
    }

    pub fn gesture(&self) -> DeleteGesture {
        self.gesture
    }

    pub fn highlight(&self) -> Option<usize> {
        self.gesture.highlight()
    }

    pub fn pending_delete(&self) -> bool {
        self.gesture.pending_delete()
    }

    pub fn active_row(&self) -> Option<usize> {
        self.active_row
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn has_focus(&self) -> bool {
        self.focus.has_focus()
    }

    pub fn dropdown_visible(&self) -> bool {
        self.focus.is_visible()
    }

    pub fn focus(&self) -> &FocusTracker {
        &self.focus
    }

    /// Owned copy of the current selection, in selection order.
    pub fn selection(&self) -> Vec<Contact> {
        self.chips.iter().map(|c| Contact::clone(c)).collect()
    }

    // ── Change listeners ───────────────────────────

    pub fn on_change(&mut self, listener: impl FnMut(&ChipChange<'_>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: ChipEvent) {
        let change = ChipChange {
            event,
            chips: self.chips.as_slice(),
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }

    // ── Keyboard ───────────────────────────────────

    /// Route a key to the widget. Keys are ignored while the input is not
    /// focused. Any key other than Backspace cancels a pending delete.
    /// Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: WidgetKey) -> bool {
        if !self.focus.has_focus() {
            return false;
        }
        if key != WidgetKey::Backspace {
            self.gesture.reset();
        }

        match key {
            WidgetKey::Char(c) => {
                self.insert_char(c);
                true
            }
            WidgetKey::Backspace => {
                self.delete_back();
                true
            }
            WidgetKey::Enter => {
                self.enter();
                true
            }
            WidgetKey::Up => {
                self.row_up();
                true
            }
            WidgetKey::Down => {
                self.row_down();
                true
            }
            WidgetKey::Left => {
                self.text.move_left();
                true
            }
            WidgetKey::Right => {
                self.text.move_right();
                true
            }
            WidgetKey::Home => {
                self.text.move_home();
                true
            }
            WidgetKey::End => {
                self.text.move_end();
                true
            }
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        self.text.insert_char(c);
        self.text_changed();
    }

    /// Replace the whole input value, as a paste or programmatic edit would.
    pub fn set_input(&mut self, value: &str) {
        let value: String = value.chars().filter(|c| !c.is_control()).collect();
        self.text.set(value);
        self.text_changed();
    }

    pub fn clear_input(&mut self) {
        if !self.text.is_empty() {
            self.text.clear();
            self.text_changed();
        }
    }

    /// Backspace. Edits text when there is any; otherwise drives the
    /// highlight-then-delete gesture on the last chip.
    pub fn delete_back(&mut self) {
        if !self.text.is_empty() {
            if self.text.delete_back() {
                self.text_changed();
            }
            return;
        }

        let Some(last) = self.chips.last_index() else {
            return;
        };
        match self.gesture.step(last) {
            GestureStep::Highlight(index) => {
                self.gesture = DeleteGesture::Highlighted { index };
                tracing::trace!(index, "chip highlighted for deletion");
            }
            GestureStep::Delete(index) => {
                self.remove_at(index);
            }
        }
    }

    /// Enter. Commits the active dropdown row if one was picked with the
    /// arrow keys, else commits the pool entry whose key equals the input.
    /// Unknown text is left in place.
    pub fn enter(&mut self) -> bool {
        if let Some(row) = self.active_row {
            return self.click_row(row);
        }
        if self.text.value().trim().is_empty() {
            return false;
        }
        match exact_match(&self.pool, self.text.value()) {
            Some(contact) => self.commit(contact),
            None => false,
        }
    }

    /// Tell the widget how many dropdown rows are on screen. Up/Down wrap
    /// within them, and an active row past the last one is dropped.
    pub fn set_row_limit(&mut self, rows: usize) {
        self.row_limit = Some(rows);
        if self.active_row.is_some_and(|row| row >= rows) {
            self.active_row = None;
        }
    }

    fn visible_rows(&self) -> usize {
        let rows = self.pool.len().min(self.config.max_rows.max(1));
        match self.row_limit {
            Some(limit) => rows.min(limit),
            None => rows,
        }
    }

    fn row_down(&mut self) {
        let visible = self.visible_rows();
        if !self.focus.is_visible() || visible == 0 {
            return;
        }
        self.active_row = Some(match self.active_row {
            Some(i) => (i + 1) % visible,
            None => 0,
        });
    }

    fn row_up(&mut self) {
        let visible = self.visible_rows();
        if !self.focus.is_visible() || visible == 0 {
            return;
        }
        self.active_row = Some(match self.active_row {
            Some(0) | None => visible - 1,
            Some(i) => i - 1,
        });
    }

    fn text_changed(&mut self) {
        self.gesture.reset();
        self.active_row = None;
        self.refilter();

        // A fully typed key commits without Enter. The pool already excludes
        // chipped keys, so this can never produce a duplicate.
        if let Some(contact) = exact_match(&self.pool, self.text.value()) {
            tracing::debug!(email = %contact.email, "exact key typed, auto-selecting");
            self.commit(contact);
        }
    }

    fn refilter(&mut self) {
        self.pool = filter(&self.candidates, &self.chips, self.text.value());
        if let Some(row) = self.active_row {
            if row >= self.pool.len() {
                self.active_row = None;
            }
        }
    }

    // ── Chip mutations ─────────────────────────────

    /// Append `contact` as a chip. Refuses keys that are already chipped.
    fn commit(&mut self, contact: Arc<Contact>) -> bool {
        if self.chips.contains_key(contact.key()) {
            tracing::debug!(email = %contact.email, "already selected, ignoring");
            return false;
        }
        tracing::debug!(email = %contact.email, "chip added");
        self.chips.append(contact.clone());
        self.after_mutation();
        self.notify(ChipEvent::Added(contact));
        true
    }

    /// Remove the chip at `index`. Stale indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> bool {
        match self.chips.remove_at(index) {
            Some(removed) => {
                tracing::debug!(email = %removed.email, index, "chip removed");
                self.after_mutation();
                self.notify(ChipEvent::Removed(removed));
                true
            }
            None => {
                tracing::trace!(index, "remove ignored, index out of range");
                false
            }
        }
    }

    /// Remove the chip with the same key as `contact`.
    pub fn remove_contact(&mut self, contact: &Contact) -> bool {
        match self.chips.remove_by_key(contact.key()) {
            Some(removed) => {
                tracing::debug!(email = %removed.email, "chip removed by identity");
                self.after_mutation();
                self.notify(ChipEvent::Removed(removed));
                true
            }
            None => false,
        }
    }

    /// Shared tail of every add/remove: clear the input, leave the delete
    /// gesture, refilter and pull focus back to the input.
    fn after_mutation(&mut self) {
        self.text.clear();
        self.gesture.reset();
        self.active_row = None;
        self.refilter();
        self.focus.focus_in();
    }

    // ── Mouse ──────────────────────────────────────

    /// Click on dropdown row `row` (index into the pool).
    pub fn click_row(&mut self, row: usize) -> bool {
        match self.pool.get(row).cloned() {
            Some(contact) => self.commit(contact),
            None => false,
        }
    }

    /// Click on the body of chip `index`: removes that chip.
    pub fn click_chip(&mut self, index: usize) -> bool {
        self.gesture.reset();
        match self.chips.get(index).cloned() {
            Some(chip) => self.remove_contact(&chip),
            None => false,
        }
    }

    /// Click on the remove glyph of chip `index`.
    pub fn click_remove(&mut self, index: usize) -> bool {
        self.gesture.reset();
        self.remove_at(index)
    }

    // ── Focus ──────────────────────────────────────

    pub fn focus_in(&mut self) {
        self.focus.focus_in();
    }

    pub fn focus_out(&mut self, now: Instant) {
        self.focus.focus_out(now);
    }

    /// Fire due focus checks. Returns true if dropdown visibility changed.
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        let changed = self.focus.poll(now);
        if changed && !self.focus.is_visible() {
            self.active_row = None;
        }
        changed
    }
}

#[cfg(test)]
mod tests;
