//! Integration tests for the Notifier facade
//!
//! These tests drive whole widget lifecycles over the mock host:
//! - Single-instance widgets and their re-entry rules
//! - Timers, dwell tokens and exit animations on the virtual clock
//! - Clicks routed through react/apply, callbacks before teardown
//! - Notification cards, the shared container and the close glyph
//! - Settings, status snapshots and a page without a document

mod common;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use astn_host_mock::MockHost;
use astn_widgets::coerce::patch_from_value;
use astn_widgets::dom::has_class;
use astn_widgets::{
    DialogPatch, Host, Notifier, NotifyPatch, Phase, PosterPatch, SnackbarPatch, Target, Task,
    ToastPatch, WidgetKind, VERSION,
};
use common::{click, counter, find, run_until};
use serde_json::json;

fn toast_expiry(notifier: &Notifier<MockHost>) -> Option<f64> {
    notifier
        .host()
        .due_of(Task::Expire(Target::Widget(WidgetKind::Toast)))
}

// =============================================================================
// Single Instance Tests
// =============================================================================

#[test]
fn test_single_instance_per_kind() {
    let mut notifier = Notifier::new(MockHost::new());

    for _ in 0..3 {
        notifier
            .dialog("Title", "Body", DialogPatch::default(), None, None)
            .poster("Poster", PosterPatch::default(), None, None)
            .toast("Toast", ToastPatch::default())
            .snackbar("Snack", SnackbarPatch::default(), None);
    }

    let host = notifier.host();
    assert_eq!(host.count_id("ast-dialog-bg"), 1);
    assert_eq!(host.count_id("ast-poster-bg"), 1);
    assert_eq!(host.count_id("ast-toast-el"), 1);
    assert_eq!(host.count_id("ast-snack-el"), 1);

    // Cards stack instead; see test_cards_stack_in_one_container
    notifier
        .notify("a", "", "", NotifyPatch::default(), None)
        .notify("b", "", "", NotifyPatch::default(), None);
    assert_eq!(notifier.host().count_id("ast-notify-container"), 1);
    assert_eq!(notifier.card_count(), 2);
}

#[test]
fn test_dialog_show_while_live_is_ignored() {
    let mut notifier = Notifier::new(MockHost::new());
    notifier.dialog("First", "one", DialogPatch::default(), None, None);
    notifier.dialog("Second", "two", DialogPatch::default(), None, None);

    let title = find(&notifier, "#ast-dialog-header");
    let h3 = notifier.host().children(title)[0];
    assert_eq!(notifier.host().inner_html(&h3), "First");
}

#[test]
fn test_remount_after_external_removal() {
    let mut notifier = Notifier::new(MockHost::new());
    notifier.toast("one", ToastPatch::default());

    let root = *notifier.root(WidgetKind::Toast).unwrap();
    notifier.host_mut().remove(&root);
    notifier.toast("two", ToastPatch::default());

    assert_eq!(notifier.host().count_id("ast-toast-el"), 1);
    assert_ne!(notifier.root(WidgetKind::Toast), Some(&root));
    assert_eq!(notifier.phase(WidgetKind::Toast), Phase::Visible);
}

// =============================================================================
// Sanitizing Tests
// =============================================================================

#[test]
fn test_script_stripped_from_rendered_text() {
    let mut notifier = Notifier::new(MockHost::new());
    notifier.toast("<script>alert(1)</script>hello", ToastPatch::default());
    notifier.dialog(
        "<script src=\"x.js\"></script>Title",
        "safe",
        patch_from_value(json!({ "positive": "<script>bad()</script>Yes" })),
        None,
        None,
    );

    let text = find(&notifier, "#ast-toast-text");
    assert_eq!(notifier.host().inner_html(&text), "hello");

    let positive = find(&notifier, "#ast-positive-dialog-button");
    assert_eq!(notifier.host().inner_html(&positive), "Yes");

    let header = find(&notifier, "#ast-dialog-header");
    let h3 = notifier.host().children(header)[0];
    assert_eq!(notifier.host().inner_html(&h3), "Title");
}

// =============================================================================
// Timer Tests
// =============================================================================

#[test]
fn test_toast_reshow_rearms_timer() {
    let mut notifier = Notifier::new(MockHost::new());
    notifier.toast("first", ToastPatch::default());
    assert_eq!(toast_expiry(&notifier), Some(2000.0));

    run_until(&mut notifier, 500.0);
    notifier.toast("second", patch_from_value(json!({ "length": 3000 })));
    assert_eq!(toast_expiry(&notifier), Some(3500.0));

    let text = find(&notifier, "#ast-toast-text");
    assert_eq!(notifier.host().inner_html(&text), "second");

    run_until(&mut notifier, 3499.0);
    assert_eq!(notifier.phase(WidgetKind::Toast), Phase::Visible);

    run_until(&mut notifier, 3500.0);
    assert_eq!(notifier.phase(WidgetKind::Toast), Phase::Dismissing);
    assert_eq!(notifier.host().count_id("ast-toast-el"), 1);

    run_until(&mut notifier, 5499.0);
    assert_eq!(notifier.phase(WidgetKind::Toast), Phase::Dismissing);

    run_until(&mut notifier, 5500.0);
    assert_eq!(notifier.phase(WidgetKind::Toast), Phase::Absent);
    assert_eq!(notifier.host().count_id("ast-toast-el"), 0);
}

#[test]
fn test_toast_reshow_during_exit_remounts() {
    let mut notifier = Notifier::new(MockHost::new());
    notifier.toast("first", ToastPatch::default());
    run_until(&mut notifier, 2100.0);
    assert_eq!(notifier.phase(WidgetKind::Toast), Phase::Dismissing);

    notifier.toast("again", ToastPatch::default());
    assert_eq!(notifier.phase(WidgetKind::Toast), Phase::Visible);
    assert_eq!(notifier.host().count_id("ast-toast-el"), 1);

    // The stale detach timer must not remove the new toast
    run_until(&mut notifier, 4000.0);
    assert_eq!(notifier.host().count_id("ast-toast-el"), 1);
}

#[test]
fn test_duration_tokens() {
    for (token, expected) in [("short", 1000.0), ("LONG", 4000.0), ("bogus", 1000.0)] {
        let mut notifier = Notifier::new(MockHost::new());
        notifier.toast("t", patch_from_value(json!({ "length": token })));
        assert_eq!(toast_expiry(&notifier), Some(expected), "token {}", token);
    }
}

#[test]
fn test_persistent_toast_has_no_timer() {
    let mut notifier = Notifier::new(MockHost::new());
    notifier.toast("stay", patch_from_value(json!({ "length": -1 })));
    assert_eq!(toast_expiry(&notifier), None);

    run_until(&mut notifier, 60_000.0);
    assert_eq!(notifier.phase(WidgetKind::Toast), Phase::Visible);
}

#[test]
fn test_snackbar_exit_takes_200ms() {
    let mut notifier = Notifier::new(MockHost::new());
    notifier.snackbar("saved", patch_from_value(json!({ "length": "short" })), None);

    run_until(&mut notifier, 1000.0);
    assert_eq!(notifier.phase(WidgetKind::Snackbar), Phase::Dismissing);
    let root = find(&notifier, "#ast-snack-el");
    assert!(has_class(notifier.host(), &root, "close"));

    run_until(&mut notifier, 1199.0);
    assert_eq!(notifier.host().count_id("ast-snack-el"), 1);
    run_until(&mut notifier, 1200.0);
    assert_eq!(notifier.host().count_id("ast-snack-el"), 0);
}

// =============================================================================
// Click Tests
// =============================================================================

#[test]
fn test_dialog_callback_runs_before_teardown() {
    let shared = Rc::new(RefCell::new(Notifier::new(MockHost::new())));
    let seen_connected = Rc::new(Cell::new(false));

    let on_positive: Rc<dyn Fn()> = {
        let weak: Weak<RefCell<Notifier<MockHost>>> = Rc::downgrade(&shared);
        let seen = Rc::clone(&seen_connected);
        Rc::new(move || {
            if let Some(notifier) = weak.upgrade() {
                seen.set(notifier.borrow().host().count_id("ast-dialog-bg") == 1);
            }
        })
    };
    shared
        .borrow_mut()
        .dialog("Delete?", "Really", DialogPatch::default(), Some(on_positive), None);

    let button = find(&shared.borrow(), "#ast-positive-dialog-button");
    let signals = shared.borrow().host().click(button);
    assert_eq!(signals.len(), 1);

    for signal in signals {
        let reaction = shared.borrow().react(signal);
        if let Some(callback) = reaction.callback {
            callback();
        }
        if let Some(effect) = reaction.effect {
            shared.borrow_mut().apply(effect);
        }
    }

    assert!(seen_connected.get());
    let notifier = shared.borrow();
    assert_eq!(notifier.phase(WidgetKind::Dialog), Phase::Absent);
    assert_eq!(notifier.host().count_id("ast-dialog-bg"), 0);
}

#[test]
fn test_dialog_negative_and_backdrop() {
    let mut notifier = Notifier::new(MockHost::new());
    let (positive_hits, on_positive) = counter();
    let (negative_hits, on_negative) = counter();

    let patch = patch_from_value(json!({ "negative": "Cancel", "dismissible": false }));
    notifier.dialog("Title", "Body", patch, Some(on_positive), Some(on_negative));

    // Not dismissible: backdrop clicks are ignored
    let backdrop = find(&notifier, "#ast-dialog-bg");
    click(&mut notifier, backdrop);
    assert_eq!(notifier.phase(WidgetKind::Dialog), Phase::Visible);

    let negative = find(&notifier, "#ast-negative-dialog-button");
    click(&mut notifier, negative);
    assert_eq!(*negative_hits.borrow(), 1);
    assert_eq!(*positive_hits.borrow(), 0);
    assert_eq!(notifier.phase(WidgetKind::Dialog), Phase::Absent);
}

#[test]
fn test_click_inside_button_label() {
    let mut notifier = Notifier::new(MockHost::new());
    let (hits, on_positive) = counter();
    let patch = patch_from_value(json!({ "positive": "<b>Yes</b>" }));
    notifier.dialog("Title", "Body", patch, Some(on_positive), None);

    let positive = find(&notifier, "#ast-positive-dialog-button");
    assert_eq!(notifier.host().inner_html(&positive), "<b>Yes</b>");

    // The mock does not parse markup, so build the label element by hand
    let host = notifier.host_mut();
    let bold = host.create_element("b").unwrap();
    host.append_child(&positive, &bold).unwrap();

    click(&mut notifier, bold);
    assert_eq!(*hits.borrow(), 1);
    assert_eq!(notifier.phase(WidgetKind::Dialog), Phase::Absent);
}

#[test]
fn test_dismissible_backdrop_closes_without_callback() {
    let mut notifier = Notifier::new(MockHost::new());
    let (hits, on_positive) = counter();
    notifier.poster("Promo", PosterPatch::default(), Some(on_positive), None);

    let backdrop = find(&notifier, "#ast-poster-bg");
    click(&mut notifier, backdrop);

    assert_eq!(notifier.phase(WidgetKind::Poster), Phase::Absent);
    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn test_snackbar_action_keeps_it_open() {
    let mut notifier = Notifier::new(MockHost::new());
    let (hits, action) = counter();
    notifier.snackbar(
        "Deleted",
        patch_from_value(json!({ "button": "UNDO" })),
        Some(action),
    );

    let message = find(&notifier, "#ast-snack-message");
    click(&mut notifier, message);
    assert_eq!(*hits.borrow(), 0);

    let button = find(&notifier, "#ast-snack-button");
    click(&mut notifier, button);
    assert_eq!(*hits.borrow(), 1);
    assert_eq!(notifier.phase(WidgetKind::Snackbar), Phase::Visible);
}

#[test]
fn test_clicks_after_teardown_reach_nobody() {
    let mut notifier = Notifier::new(MockHost::new());
    let (hits, on_positive) = counter();
    notifier.dialog("t", "m", DialogPatch::default(), Some(on_positive), None);

    let button = find(&notifier, "#ast-positive-dialog-button");
    click(&mut notifier, button);
    click(&mut notifier, button);
    assert_eq!(*hits.borrow(), 1);
}

// =============================================================================
// Close & Body Class Tests
// =============================================================================

#[test]
fn test_body_class_tracks_modal() {
    let mut notifier = Notifier::new(MockHost::new());
    let body = notifier.host().body().unwrap();

    notifier.dialog("t", "m", DialogPatch::default(), None, None);
    assert!(has_class(notifier.host(), &body, "ast-dialog"));

    notifier.poster("p", PosterPatch::default(), None, None);
    assert!(has_class(notifier.host(), &body, "ast-poster"));

    notifier.close(WidgetKind::Dialog);
    assert!(!has_class(notifier.host(), &body, "ast-dialog"));
    assert!(has_class(notifier.host(), &body, "ast-poster"));
}

#[test]
fn test_close_skips_callbacks() {
    let mut notifier = Notifier::new(MockHost::new());
    let (hits, on_positive) = counter();
    notifier.poster("p", PosterPatch::default(), Some(on_positive), None);

    notifier.close(WidgetKind::Poster);
    assert_eq!(notifier.phase(WidgetKind::Poster), Phase::Absent);
    assert_eq!(notifier.host().count_id("ast-poster-bg"), 0);
    assert_eq!(*hits.borrow(), 0);

    // Closing again, or closing a kind without explicit close, is harmless
    notifier.close(WidgetKind::Poster);
    notifier.toast("t", ToastPatch::default());
    notifier.close(WidgetKind::Toast);
    assert_eq!(notifier.phase(WidgetKind::Toast), Phase::Visible);
}

// =============================================================================
// Notification Card Tests
// =============================================================================

#[test]
fn test_persistent_card_has_glyph_and_no_timer() {
    let mut notifier = Notifier::new(MockHost::new());
    let (hits, on_interact) = counter();
    notifier.notify(
        "Title",
        "Body",
        "Footer",
        patch_from_value(json!({ "length": -1 })),
        Some(on_interact),
    );

    let id = notifier.card_ids()[0];
    assert_eq!(notifier.host().find_all(".ast-notify-close").len(), 1);
    assert_eq!(
        notifier.host().due_of(Task::Expire(Target::Card(id))),
        None
    );

    run_until(&mut notifier, 100_000.0);
    assert_eq!(notifier.card_phase(id), Phase::Visible);

    // Clicking the card body of a persistent card does nothing
    let body = find(&notifier, ".notify-body");
    click(&mut notifier, body);
    assert_eq!(notifier.card_phase(id), Phase::Visible);

    let glyph = find(&notifier, ".ast-notify-close");
    click(&mut notifier, glyph);
    assert_eq!(notifier.card_phase(id), Phase::Dismissing);
    assert_eq!(*hits.borrow(), 0);

    let panel = find(&notifier, ".ast-notify-el");
    assert!(has_class(notifier.host(), &panel, "close-click"));

    run_until(&mut notifier, 100_200.0);
    assert_eq!(notifier.card_count(), 0);
}

#[test]
fn test_timed_card_dismisses_on_schedule() {
    let mut notifier = Notifier::new(MockHost::new());
    notifier.notify(
        "Title",
        "Body",
        "",
        patch_from_value(json!({ "length": 1500 })),
        None,
    );

    let id = notifier.card_ids()[0];
    assert!(notifier.host().find_all(".ast-notify-close").is_empty());

    run_until(&mut notifier, 1499.0);
    assert_eq!(notifier.card_phase(id), Phase::Visible);

    run_until(&mut notifier, 1500.0);
    assert_eq!(notifier.card_phase(id), Phase::Dismissing);
    let panel = find(&notifier, ".ast-notify-el");
    assert!(has_class(notifier.host(), &panel, "close"));

    run_until(&mut notifier, 1700.0);
    assert_eq!(notifier.card_phase(id), Phase::Absent);
    assert_eq!(notifier.phase(WidgetKind::Notify), Phase::Absent);
}

#[test]
fn test_cards_stack_in_one_container() {
    let mut notifier = Notifier::new(MockHost::new());
    let (hits, on_interact) = counter();

    notifier.notify("a", "", "", NotifyPatch::default(), Some(on_interact));
    run_until(&mut notifier, 500.0);
    notifier.notify("b", "", "", NotifyPatch::default(), None);

    assert_eq!(notifier.host().count_id("ast-notify-container"), 1);
    assert_eq!(notifier.card_count(), 2);

    let container = find(&notifier, "#ast-notify-container");
    assert_eq!(notifier.host().children(container).len(), 2);

    // Each card expires on its own timer
    run_until(&mut notifier, 2000.0);
    let ids = notifier.card_ids();
    assert_eq!(notifier.card_phase(ids[0]), Phase::Dismissing);
    assert_eq!(notifier.card_phase(ids[1]), Phase::Visible);

    // Clicking a timed card runs the callback and dismisses it
    let second = *notifier.card_root(ids[1]).unwrap();
    click(&mut notifier, second);
    assert_eq!(*hits.borrow(), 1);
    assert_eq!(notifier.card_phase(ids[1]), Phase::Dismissing);

    run_until(&mut notifier, 3000.0);
    assert_eq!(notifier.card_count(), 0);
}

#[test]
fn test_card_height_measured_after_mount() {
    let mut notifier = Notifier::new(MockHost::new());
    notifier.notify("t", "m", "", NotifyPatch::default(), None);
    let id = notifier.card_ids()[0];
    let wrapper = *notifier.card_root(id).unwrap();
    assert_eq!(notifier.host().style(&wrapper, "height"), None);

    let panel = find(&notifier, ".ast-notify-el");
    notifier.host_mut().set_client_height(panel, 72.0);
    run_until(&mut notifier, 10.0);
    assert_eq!(
        notifier.host().style(&wrapper, "height").as_deref(),
        Some("72px")
    );
}

// =============================================================================
// Settings & Status Tests
// =============================================================================

#[test]
fn test_set_theme_applies_to_later_shows() {
    let mut notifier = Notifier::new(MockHost::new());
    notifier.set_theme("dark");
    assert_eq!(notifier.theme(), "dark");

    notifier.set_theme("no-such-theme");
    assert_eq!(notifier.theme(), "dark");

    notifier.toast("t", ToastPatch::default());
    let status = notifier.status();
    let toast = status
        .widgets
        .iter()
        .find(|w| w.kind == "toast")
        .unwrap();
    assert_eq!(toast.theme, "dark");
}

#[test]
fn test_z_index_setter() {
    let mut notifier = Notifier::new(MockHost::new());
    assert_eq!(notifier.z_index(), 10000);

    notifier.set_z_index("20000");
    assert_eq!(notifier.z_index(), 20000);

    notifier.set_z_index("abc");
    assert_eq!(notifier.z_index(), 20000);

    notifier.set_z_index(500);
    notifier.dialog("t", "m", DialogPatch::default(), None, None);
    let panel = find(&notifier, "#ast-dialog-el");
    assert_eq!(
        notifier.host().style(&panel, "z-index").as_deref(),
        Some("500")
    );
}

#[test]
fn test_status_snapshot() {
    let mut notifier = Notifier::new(MockHost::new());
    notifier.toast("t", ToastPatch::default());
    notifier.notify("n", "", "", NotifyPatch::default(), None);

    let value = serde_json::to_value(notifier.status()).unwrap();
    assert_eq!(value["version"], VERSION);
    assert_eq!(value["zIndex"], 10000);
    assert_eq!(value["theme"], "default");

    let widgets = value["widgets"].as_array().unwrap();
    assert_eq!(widgets.len(), 5);
    assert_eq!(widgets[0]["kind"], "dialog");
    assert_eq!(widgets[0]["phase"], "absent");
    assert_eq!(widgets[2]["kind"], "toast");
    assert_eq!(widgets[2]["phase"], "visible");
    assert_eq!(widgets[4]["kind"], "notify");
    assert_eq!(widgets[4]["cards"], 1);
    assert!(widgets[0].get("cards").is_none());
}

// =============================================================================
// Missing Document Tests
// =============================================================================

#[test]
fn test_without_document_is_a_no_op() {
    let mut notifier = Notifier::new(MockHost::without_document());
    notifier
        .dialog("t", "m", DialogPatch::default(), None, None)
        .poster("p", PosterPatch::default(), None, None)
        .toast("t", ToastPatch::default())
        .snackbar("s", SnackbarPatch::default(), None)
        .notify("n", "", "", NotifyPatch::default(), None);

    for kind in WidgetKind::ALL {
        assert_eq!(notifier.phase(kind), Phase::Absent);
    }
    assert_eq!(notifier.card_count(), 0);
    assert!(notifier.host().pending_timers().is_empty());
}
