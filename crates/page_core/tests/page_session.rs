//! End-to-end page sessions against real timers, the file-backed preference
//! store and the simulated submission service.

use std::{sync::Arc, time::Duration};

use page_core::{
    testing::{RecordingView, ViewCall},
    Dispatched, FormStatus, PageController, PageDeps, PageEvent, PageSettings,
    SimulatedSubmissionService, SubmitOutcome, TokioScheduler,
};
use shared::{
    domain::{SectionId, SectionRegistry},
    protocol::ContactForm,
};
use storage::{JsonFileStore, PreferenceStore};

fn start_session(
    store_path: &std::path::Path,
    fragment: Option<&str>,
) -> (PageController, Arc<RecordingView>) {
    let view = Arc::new(RecordingView::new());
    let page = PageController::start(
        PageDeps {
            view: view.clone(),
            scheduler: Arc::new(TokioScheduler::current()),
            preferences: PreferenceStore::new(Arc::new(JsonFileStore::new(store_path))),
            registry: SectionRegistry::new("Brightline"),
            service: Arc::new(SimulatedSubmissionService::new(Duration::from_secs(1))),
        },
        &PageSettings::default(),
        fragment,
    );
    (page, view)
}

#[tokio::test(start_paused = true)]
async fn last_section_survives_a_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store_path = dir.path().join("preferences.json");

    let (mut page, _view) = start_session(&store_path, None);
    assert_eq!(page.navigation().current(), SectionId::Home);
    page.dispatch(PageEvent::NavClick {
        target: "#privacy".to_string(),
    });
    drop(page);

    let (page, view) = start_session(&store_path, None);
    assert_eq!(page.navigation().current(), SectionId::Privacy);
    assert_eq!(
        view.last_title().as_deref(),
        Some("Privacy Policy | Brightline")
    );

    // A deep link wins but does not overwrite the stored choice.
    let (page, _view) = start_session(&store_path, Some("faq"));
    assert_eq!(page.navigation().current(), SectionId::Faq);
    drop(page);
    let (page, _view) = start_session(&store_path, None);
    assert_eq!(page.navigation().current(), SectionId::Privacy);
}

#[tokio::test(start_paused = true)]
async fn contact_submission_round_trip_with_timers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (mut page, view) = start_session(&dir.path().join("preferences.json"), Some("#contact"));

    let form = ContactForm {
        name: "Grace".to_string(),
        email: "grace@example.com".to_string(),
        contact: String::new(),
        subject: "Compilers".to_string(),
        message: "Let's chat.".to_string(),
    };
    let Dispatched::SubmissionStarted(handle) = page.dispatch(PageEvent::Submit { form }) else {
        panic!("submit should spawn");
    };

    // The page keeps handling events while the service is waiting.
    page.dispatch(PageEvent::ToggleSidebar { trigger: None });
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(page.sidebar().is_open());
    assert!(view.calls().contains(&ViewCall::Focus("sidebar-close".into())));

    let outcome = handle.await.expect("join");
    assert!(matches!(outcome, SubmitOutcome::Succeeded(_)));
    assert_eq!(view.count(|c| *c == ViewCall::SubmitBusy(false)), 1);
    assert!(matches!(
        view.last_status(),
        Some(Some(FormStatus::Success(_)))
    ));

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(view.last_status(), Some(None));
}
