use std::sync::Arc;

use storage::{DisabledStore, KeyValueStore, MemoryStore, LAST_SECTION_KEY};

use super::*;
use crate::testing::{RecordingView, ViewCall};

fn controller_with(
    store: Arc<dyn KeyValueStore>,
    fragment: Option<&str>,
) -> (NavigationController, Arc<RecordingView>) {
    let view = Arc::new(RecordingView::new());
    let controller = NavigationController::start(
        SectionRegistry::new("Brightline"),
        PreferenceStore::new(store),
        view.clone(),
        fragment,
    );
    (controller, view)
}

fn stored(value: &str) -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::with_value(LAST_SECTION_KEY, value))
}

#[test]
fn fragment_wins_over_stored_preference() {
    let store = stored("tos");
    let (controller, view) = controller_with(store.clone(), Some("#faq"));

    assert_eq!(controller.current(), SectionId::Faq);
    assert_eq!(view.last_title().as_deref(), Some("FAQ | Brightline"));
    // A fragment-derived start leaves the stored value alone.
    assert_eq!(
        store.get(LAST_SECTION_KEY).expect("get").as_deref(),
        Some("tos")
    );
}

#[test]
fn stored_preference_used_without_fragment() {
    let (controller, _view) = controller_with(stored("tos"), None);
    assert_eq!(controller.current(), SectionId::Tos);
}

#[test]
fn defaults_to_home_without_fragment_or_preference() {
    let (controller, _view) = controller_with(Arc::new(MemoryStore::new()), None);
    assert_eq!(controller.current(), SectionId::Home);
}

#[test]
fn unusable_fragment_falls_through_to_preference() {
    let (controller, _view) = controller_with(stored("privacy"), Some("#pricing"));
    assert_eq!(controller.current(), SectionId::Privacy);
}

#[test]
fn startup_resolution_reports_its_source() {
    let prefs = PreferenceStore::new(stored("contact"));
    assert_eq!(
        resolve_initial_section(Some("faq"), &prefs),
        (SectionId::Faq, StartupSource::Fragment)
    );
    assert_eq!(
        resolve_initial_section(None, &prefs),
        (SectionId::Contact, StartupSource::Preference)
    );
    assert_eq!(
        resolve_initial_section(None, &PreferenceStore::new(Arc::new(DisabledStore))),
        (SectionId::Home, StartupSource::Default)
    );
}

#[test]
fn startup_marks_only_initial_section_active_without_side_effects() {
    let (_controller, view) = controller_with(Arc::new(MemoryStore::new()), Some("#contact"));

    let calls = view.calls();
    assert!(calls.contains(&ViewCall::SectionActive(SectionId::Contact, true)));
    assert_eq!(
        view.count(|c| matches!(c, ViewCall::SectionActive(_, true))),
        1
    );
    assert!(!calls.contains(&ViewCall::ScrollToTop));
    assert_eq!(view.count(|c| matches!(c, ViewCall::PushHistory(_))), 0);
    assert_eq!(view.count(|c| matches!(c, ViewCall::Announce(_))), 0);
}

#[test]
fn go_to_applies_side_effects_in_order() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let (mut controller, view) = controller_with(store.clone(), None);
    view.clear_calls();

    let outcome = controller.go_to("#faq").expect("navigate");

    assert_eq!(
        outcome,
        NavigationOutcome::Changed {
            from: SectionId::Home,
            to: SectionId::Faq
        }
    );
    assert_eq!(controller.current(), SectionId::Faq);
    assert_eq!(
        view.calls(),
        vec![
            ViewCall::SectionActive(SectionId::Home, false),
            ViewCall::SectionActive(SectionId::Faq, true),
            ViewCall::ScrollToTop,
            ViewCall::SetTitle("FAQ | Brightline".to_string()),
            ViewCall::Announce("Navigated to FAQ".to_string()),
            ViewCall::PushHistory("#faq".to_string()),
        ]
    );
    assert_eq!(
        store.get(LAST_SECTION_KEY).expect("get").as_deref(),
        Some("faq")
    );
}

#[test]
fn every_known_section_is_reachable() {
    let (mut controller, _view) = controller_with(Arc::new(MemoryStore::new()), None);
    for section in SectionId::ALL {
        controller.go_to(section.as_str()).expect("navigate");
        assert_eq!(controller.current(), section);
    }
}

#[test]
fn same_section_is_a_no_op() {
    let (mut controller, view) = controller_with(Arc::new(MemoryStore::new()), Some("#tos"));
    view.clear_calls();

    let outcome = controller.go_to("tos").expect("navigate");

    assert_eq!(outcome, NavigationOutcome::Unchanged(SectionId::Tos));
    assert!(view.calls().is_empty());
}

#[test]
fn invalid_targets_leave_state_untouched() {
    let (mut controller, view) = controller_with(Arc::new(MemoryStore::new()), Some("#contact"));
    view.clear_calls();

    for target in ["", "#", "pricing", "#FAQ", "faq#tos", "../home"] {
        assert!(controller.go_to(target).is_err(), "{target:?} accepted");
        assert_eq!(controller.current(), SectionId::Contact);
    }
    assert!(view.calls().is_empty());
}

#[test]
fn persistence_failure_does_not_block_navigation() {
    let (mut controller, view) = controller_with(Arc::new(DisabledStore), None);

    controller.go_to("privacy").expect("navigate");

    assert_eq!(controller.current(), SectionId::Privacy);
    assert_eq!(
        view.last_title().as_deref(),
        Some("Privacy Policy | Brightline")
    );
}

#[test]
fn history_change_uses_fragment_without_pushing() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let (mut controller, view) = controller_with(store.clone(), None);
    controller.go_to("faq").expect("navigate");
    view.clear_calls();

    let outcome = controller.on_history_change(Some("contact"));

    assert_eq!(
        outcome,
        NavigationOutcome::Changed {
            from: SectionId::Faq,
            to: SectionId::Contact
        }
    );
    assert_eq!(view.count(|c| matches!(c, ViewCall::PushHistory(_))), 0);
    assert_eq!(
        store.get(LAST_SECTION_KEY).expect("get").as_deref(),
        Some("contact")
    );
}

#[test]
fn history_change_without_fragment_ignores_preference() {
    let (mut controller, _view) = controller_with(stored("tos"), None);
    assert_eq!(controller.current(), SectionId::Tos);

    controller.on_history_change(None);
    assert_eq!(controller.current(), SectionId::Home);

    controller.go_to("faq").expect("navigate");
    controller.on_history_change(Some("#nope"));
    assert_eq!(controller.current(), SectionId::Home);
}

#[test]
fn extracts_fragments_from_locations() {
    assert_eq!(
        fragment_from_location("https://example.com/#faq").as_deref(),
        Some("faq")
    );
    assert_eq!(fragment_from_location("#tos").as_deref(), Some("tos"));
    assert_eq!(fragment_from_location("https://example.com/"), None);
    assert_eq!(fragment_from_location("https://example.com/#"), None);
    assert_eq!(fragment_from_location("faq"), None);
}
