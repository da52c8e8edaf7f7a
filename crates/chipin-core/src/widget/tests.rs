use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::*;

fn ann_bob() -> ChipInput {
    ChipInput::from_contacts(
        vec![
            Contact::new("Ann", "ann@x.com"),
            Contact::new("Bob", "bob@x.com"),
        ],
        WidgetConfig::default(),
    )
}

fn type_str(w: &mut ChipInput, s: &str) {
    for c in s.chars() {
        w.handle_key(WidgetKey::Char(c));
    }
}

fn pool_names(w: &ChipInput) -> Vec<&str> {
    w.pool().iter().map(|c| c.name.as_str()).collect()
}

fn chip_names(w: &ChipInput) -> Vec<&str> {
    w.chips().iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn test_mounts_focused_with_full_pool() {
    let w = ann_bob();
    assert!(w.has_focus());
    assert!(w.dropdown_visible());
    assert_eq!(pool_names(&w), vec!["Ann", "Bob"]);
    assert!(w.chips().is_empty());
    assert_eq!(w.highlight(), None);
}

#[test]
fn test_scenario_type_click_then_double_backspace() {
    let mut w = ann_bob();

    type_str(&mut w, "an");
    assert_eq!(pool_names(&w), vec!["Ann"]);

    assert!(w.click_row(0));
    assert_eq!(chip_names(&w), vec!["Ann"]);
    assert_eq!(w.input(), "");
    assert_eq!(pool_names(&w), vec!["Bob"]);

    w.handle_key(WidgetKey::Backspace);
    assert_eq!(w.highlight(), Some(0));
    assert!(w.pending_delete());
    assert_eq!(chip_names(&w), vec!["Ann"]);

    w.handle_key(WidgetKey::Backspace);
    assert!(w.chips().is_empty());
    assert_eq!(w.highlight(), None);
    assert!(!w.pending_delete());
    assert_eq!(pool_names(&w), vec!["Ann", "Bob"]);
}

#[test]
fn test_typing_exact_key_auto_commits() {
    let mut w = ann_bob();
    type_str(&mut w, "bob@x.com");
    assert_eq!(chip_names(&w), vec!["Bob"]);
    assert_eq!(w.input(), "");
    assert_eq!(pool_names(&w), vec!["Ann"]);
}

#[test]
fn test_retyping_chipped_key_does_not_duplicate() {
    let mut w = ann_bob();
    type_str(&mut w, "bob@x.com");
    type_str(&mut w, "bob@x.com");
    assert_eq!(chip_names(&w), vec!["Bob"]);
    assert_eq!(w.input(), "bob@x.com");
    assert!(w.pool().is_empty());

    // Enter cannot commit it either.
    assert!(!w.enter());
    assert_eq!(w.chips().len(), 1);
}

#[test]
fn test_enter_with_unknown_text_keeps_input() {
    let mut w = ann_bob();
    type_str(&mut w, "zed");
    w.handle_key(WidgetKey::Enter);
    assert!(w.chips().is_empty());
    assert_eq!(w.input(), "zed");
}

#[test]
fn test_deleting_down_to_exact_key_auto_commits() {
    let mut w = ann_bob();
    type_str(&mut w, "Xann@x.com");
    assert!(w.chips().is_empty());

    w.handle_key(WidgetKey::Home);
    w.handle_key(WidgetKey::Right);
    w.handle_key(WidgetKey::Backspace);
    assert_eq!(chip_names(&w), vec!["Ann"]);
    assert_eq!(w.input(), "");
}

#[test]
fn test_enter_with_whitespace_only_is_noop() {
    let mut w = ann_bob();
    type_str(&mut w, "  ");
    assert!(!w.enter());
    assert_eq!(w.input(), "  ");
}

#[test]
fn test_other_key_between_backspaces_resets_gesture() {
    let mut w = ann_bob();
    w.click_row(0);
    w.click_row(0);
    assert_eq!(chip_names(&w), vec!["Ann", "Bob"]);

    w.handle_key(WidgetKey::Backspace);
    assert_eq!(w.highlight(), Some(1));

    w.handle_key(WidgetKey::Left);
    assert_eq!(w.highlight(), None);
    assert_eq!(w.chips().len(), 2);

    // Starts over: highlight first, then delete.
    w.handle_key(WidgetKey::Backspace);
    assert_eq!(w.chips().len(), 2);
    w.handle_key(WidgetKey::Backspace);
    assert_eq!(chip_names(&w), vec!["Ann"]);
}

#[test]
fn test_typing_clears_highlight_without_removing() {
    let mut w = ann_bob();
    w.click_row(1);
    w.handle_key(WidgetKey::Backspace);
    assert!(w.pending_delete());

    type_str(&mut w, "a");
    assert_eq!(w.highlight(), None);
    assert!(!w.pending_delete());
    assert_eq!(chip_names(&w), vec!["Bob"]);

    // Backspace now edits text, it does not touch chips.
    w.handle_key(WidgetKey::Backspace);
    assert_eq!(w.input(), "");
    assert_eq!(chip_names(&w), vec!["Bob"]);
    assert_eq!(w.highlight(), None);
}

#[test]
fn test_backspace_with_no_chips_is_noop() {
    let mut w = ann_bob();
    w.handle_key(WidgetKey::Backspace);
    assert_eq!(w.highlight(), None);
    assert!(!w.pending_delete());
}

#[test]
fn test_click_chip_removes_by_key() {
    let mut w = ann_bob();
    w.click_row(0);
    w.click_row(0);
    type_str(&mut w, "q");

    assert!(w.click_chip(0));
    assert_eq!(chip_names(&w), vec!["Bob"]);
    assert_eq!(w.input(), "");
    assert_eq!(pool_names(&w), vec!["Ann"]);
}

#[test]
fn test_click_remove_and_stale_index() {
    let mut w = ann_bob();
    w.click_row(0);
    w.handle_key(WidgetKey::Backspace);
    assert!(w.pending_delete());

    assert!(!w.click_remove(3));
    assert_eq!(w.chips().len(), 1);
    assert!(!w.pending_delete());

    assert!(w.click_remove(0));
    assert!(w.chips().is_empty());
    assert!(!w.click_chip(0));
}

#[test]
fn test_chip_body_click_clears_pending_delete() {
    let mut w = ann_bob();
    w.click_row(0);
    w.click_row(0);
    w.handle_key(WidgetKey::Backspace);
    assert_eq!(w.highlight(), Some(1));

    assert!(w.click_chip(0));
    assert!(!w.pending_delete());
    assert_eq!(w.highlight(), None);
    assert_eq!(chip_names(&w), vec!["Bob"]);

    // The next Backspace starts over with a highlight.
    w.handle_key(WidgetKey::Backspace);
    assert_eq!(w.highlight(), Some(0));
    assert_eq!(w.chips().len(), 1);
}

#[test]
fn test_row_limit_caps_arrow_rows() {
    let mut w = ann_bob();
    w.handle_key(WidgetKey::Down);
    w.handle_key(WidgetKey::Down);
    assert_eq!(w.active_row(), Some(1));

    w.set_row_limit(1);
    assert_eq!(w.active_row(), None);
    w.handle_key(WidgetKey::Down);
    w.handle_key(WidgetKey::Down);
    assert_eq!(w.active_row(), Some(0));

    w.set_row_limit(0);
    w.handle_key(WidgetKey::Up);
    assert_eq!(w.active_row(), None);
    w.handle_key(WidgetKey::Enter);
    assert!(w.chips().is_empty());
}

#[test]
fn test_row_click_out_of_range_is_noop() {
    let mut w = ann_bob();
    assert!(!w.click_row(7));
    assert!(w.chips().is_empty());
}

#[test]
fn test_commit_clears_input_and_highlight() {
    let mut w = ann_bob();
    w.click_row(0);
    w.handle_key(WidgetKey::Backspace);
    assert_eq!(w.highlight(), Some(0));

    w.click_row(0);
    assert_eq!(w.input(), "");
    assert_eq!(w.highlight(), None);
    assert!(!w.pending_delete());
}

#[test]
fn test_arrow_keys_pick_row_for_enter() {
    let mut w = ann_bob();
    w.handle_key(WidgetKey::Down);
    assert_eq!(w.active_row(), Some(0));
    w.handle_key(WidgetKey::Down);
    assert_eq!(w.active_row(), Some(1));
    w.handle_key(WidgetKey::Down);
    assert_eq!(w.active_row(), Some(0));
    w.handle_key(WidgetKey::Up);
    assert_eq!(w.active_row(), Some(1));

    w.handle_key(WidgetKey::Enter);
    assert_eq!(chip_names(&w), vec!["Bob"]);
    assert_eq!(w.active_row(), None);
}

#[test]
fn test_typing_resets_active_row() {
    let mut w = ann_bob();
    w.handle_key(WidgetKey::Down);
    type_str(&mut w, "b");
    assert_eq!(w.active_row(), None);
    w.handle_key(WidgetKey::Enter);
    assert!(w.chips().is_empty());
    assert_eq!(w.input(), "b");
}

#[test]
fn test_keys_ignored_without_focus() {
    let t0 = Instant::now();
    let mut w = ann_bob();
    w.focus_out(t0);
    assert!(!w.handle_key(WidgetKey::Char('a')));
    assert_eq!(w.input(), "");
}

#[test]
fn test_dropdown_survives_debounce_window_for_row_click() {
    let t0 = Instant::now();
    let mut w = ann_bob();

    // Clicking a row first takes focus away from the input.
    w.focus_out(t0);
    w.poll_timers(t0 + Duration::from_millis(50));
    assert!(w.dropdown_visible());

    // The click lands inside the window, and the commit refocuses.
    assert!(w.click_row(0));
    assert!(w.has_focus());

    // The stale check finds the input focused.
    assert!(!w.poll_timers(t0 + Duration::from_millis(400)));
    assert!(w.dropdown_visible());
}

#[test]
fn test_dropdown_hides_after_debounce() {
    let t0 = Instant::now();
    let mut w = ann_bob();
    w.handle_key(WidgetKey::Down);
    w.focus_out(t0);
    assert!(w.poll_timers(t0 + Duration::from_millis(300)));
    assert!(!w.dropdown_visible());
    assert_eq!(w.active_row(), None);

    w.focus_in();
    assert!(w.dropdown_visible());
}

#[test]
fn test_listeners_see_each_mutation() {
    let seen: Rc<RefCell<Vec<(String, usize)>>> = Rc::default();
    let mut w = ann_bob();
    let sink = seen.clone();
    let id = w.on_change(move |change| {
        let label = match &change.event {
            ChipEvent::Added(c) => format!("+{}", c.name),
            ChipEvent::Removed(c) => format!("-{}", c.name),
        };
        sink.borrow_mut().push((label, change.chips.len()));
    });

    w.click_row(0);
    type_str(&mut w, "bob@x.com");
    w.click_remove(0);

    assert_eq!(
        *seen.borrow(),
        vec![
            ("+Ann".to_string(), 1),
            ("+Bob".to_string(), 2),
            ("-Ann".to_string(), 1),
        ]
    );

    assert!(w.remove_listener(id));
    w.click_remove(0);
    assert_eq!(seen.borrow().len(), 3);
    assert!(!w.remove_listener(id));
}

#[test]
fn test_selection_is_owned_copy() {
    let mut w = ann_bob();
    w.click_row(1);
    assert_eq!(w.selection(), vec![Contact::new("Bob", "bob@x.com")]);
}

#[test]
fn test_set_input_strips_control_chars_and_auto_commits() {
    let mut w = ann_bob();
    w.set_input("ann@x.com\n");
    assert_eq!(chip_names(&w), vec!["Ann"]);
    assert_eq!(w.input(), "");
}

// ── Property: no duplicate keys through the public surface ──

#[derive(Debug, Clone)]
enum Action {
    Type(char),
    TypeKey(usize),
    Backspace,
    Enter,
    Down,
    ClickRow(usize),
    ClickChip(usize),
    ClickRemove(usize),
    Blur,
    Focus,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        prop::sample::select(vec!['a', 'b', 'c', '@', '.', 'x']).prop_map(Action::Type),
        (0usize..4).prop_map(Action::TypeKey),
        Just(Action::Backspace),
        Just(Action::Enter),
        Just(Action::Down),
        (0usize..5).prop_map(Action::ClickRow),
        (0usize..5).prop_map(Action::ClickChip),
        (0usize..5).prop_map(Action::ClickRemove),
        Just(Action::Blur),
        Just(Action::Focus),
    ]
}

fn four_contacts() -> ChipInput {
    ChipInput::from_contacts(
        vec![
            Contact::new("Ann", "a@x.c"),
            Contact::new("Abe", "ab@x.c"),
            Contact::new("Bob", "b@x.c"),
            Contact::new("Cab", "c@x.c"),
        ],
        WidgetConfig::default(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn no_duplicate_chip_keys(actions in prop::collection::vec(action_strategy(), 0..60)) {
        let t0 = Instant::now();
        let mut w = four_contacts();
        let keys: Vec<String> = w.candidates().iter().map(|c| c.email.clone()).collect();

        for (step, action) in actions.into_iter().enumerate() {
            let now = t0 + Duration::from_millis(step as u64 * 100);
            w.poll_timers(now);
            match action {
                Action::Type(c) => { w.handle_key(WidgetKey::Char(c)); }
                Action::TypeKey(i) => {
                    for c in keys[i].chars() {
                        w.handle_key(WidgetKey::Char(c));
                    }
                }
                Action::Backspace => { w.handle_key(WidgetKey::Backspace); }
                Action::Enter => { w.handle_key(WidgetKey::Enter); }
                Action::Down => { w.handle_key(WidgetKey::Down); }
                Action::ClickRow(i) => {
                    if w.dropdown_visible() {
                        w.click_row(i);
                    }
                }
                Action::ClickChip(i) => { w.click_chip(i); }
                Action::ClickRemove(i) => { w.click_remove(i); }
                Action::Blur => w.focus_out(now),
                Action::Focus => w.focus_in(),
            }

            let mut seen = HashSet::new();
            for key in w.chips().keys() {
                prop_assert!(seen.insert(key.to_string()), "duplicate chip {key}");
            }
            if w.highlight().is_some() {
                prop_assert!(w.input().is_empty());
                prop_assert_eq!(w.highlight(), w.chips().last_index());
            }
            for c in w.pool() {
                prop_assert!(!w.chips().contains_key(c.key()));
            }
        }
    }
}
