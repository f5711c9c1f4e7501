//! Recording fakes for the view, scheduler and submission service.

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Duration,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{FormField, SectionId},
    protocol::{ContactSubmission, SubmissionReceipt},
};
use tokio::sync::Notify;

use crate::{
    scheduler::{DeferredTask, Scheduler, TaskHandle},
    submission::SubmissionService,
    view::{ElementId, FormStatus, PageView},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    SetTitle(String),
    ScrollToTop,
    SectionActive(SectionId, bool),
    PushHistory(String),
    Announce(String),
    SidebarOpen(bool),
    ScrollLocked(bool),
    Focus(ElementId),
    FieldError(FormField, Option<String>),
    FormStatus(Option<FormStatus>),
    SubmitBusy(bool),
    ClearForm,
    FaqExpanded(usize, bool),
    HeaderScrolled(bool),
}

struct RecordingState {
    calls: Vec<ViewCall>,
    focused: Option<ElementId>,
    present: HashSet<ElementId>,
    focusables: Vec<ElementId>,
    close_control: Option<ElementId>,
}

pub struct RecordingView {
    state: Mutex<RecordingState>,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingView {
    pub const CLOSE_CONTROL: &'static str = "sidebar-close";
    pub const MENU_TOGGLE: &'static str = "menu-toggle";

    pub fn new() -> Self {
        Self::with_focusables(&[Self::CLOSE_CONTROL, "nav-home", "nav-faq", "nav-contact"])
    }

    pub fn with_focusables(focusables: &[&str]) -> Self {
        let focusables: Vec<ElementId> = focusables.iter().copied().map(ElementId::from).collect();
        let mut present: HashSet<ElementId> = focusables.iter().cloned().collect();
        present.insert(ElementId::from(Self::MENU_TOGGLE));
        let close_control = focusables
            .iter()
            .find(|el| el.as_str() == Self::CLOSE_CONTROL)
            .cloned();

        Self {
            state: Mutex::new(RecordingState {
                calls: Vec::new(),
                focused: None,
                present,
                focusables,
                close_control,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RecordingState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: ViewCall) {
        self.lock().calls.push(call);
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn count(&self, predicate: impl Fn(&ViewCall) -> bool) -> usize {
        self.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn last_title(&self) -> Option<String> {
        self.lock().calls.iter().rev().find_map(|call| match call {
            ViewCall::SetTitle(title) => Some(title.clone()),
            _ => None,
        })
    }

    pub fn last_status(&self) -> Option<Option<FormStatus>> {
        self.lock().calls.iter().rev().find_map(|call| match call {
            ViewCall::FormStatus(status) => Some(status.clone()),
            _ => None,
        })
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.lock().focused.clone()
    }

    /// Moves focus as a user would, without recording a view call.
    pub fn set_focused(&self, element: &str) {
        self.lock().focused = Some(ElementId::from(element));
    }

    pub fn remove_element(&self, element: &str) {
        let element = ElementId::from(element);
        let mut state = self.lock();
        state.present.remove(&element);
        if state.focused.as_ref() == Some(&element) {
            state.focused = None;
        }
    }
}

impl PageView for RecordingView {
    fn set_title(&self, title: &str) {
        self.record(ViewCall::SetTitle(title.to_string()));
    }

    fn scroll_to_top(&self) {
        self.record(ViewCall::ScrollToTop);
    }

    fn set_section_active(&self, section: SectionId, active: bool) {
        self.record(ViewCall::SectionActive(section, active));
    }

    fn push_history(&self, fragment: &str) {
        self.record(ViewCall::PushHistory(fragment.to_string()));
    }

    fn announce(&self, message: &str) {
        self.record(ViewCall::Announce(message.to_string()));
    }

    fn set_sidebar_open(&self, open: bool) {
        self.record(ViewCall::SidebarOpen(open));
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.record(ViewCall::ScrollLocked(locked));
    }

    fn sidebar_focusables(&self) -> Vec<ElementId> {
        self.lock().focusables.clone()
    }

    fn sidebar_close_control(&self) -> Option<ElementId> {
        self.lock().close_control.clone()
    }

    fn focused_element(&self) -> Option<ElementId> {
        self.lock().focused.clone()
    }

    fn focus(&self, element: &ElementId) -> bool {
        let mut state = self.lock();
        if !state.present.contains(element) {
            return false;
        }
        state.focused = Some(element.clone());
        state.calls.push(ViewCall::Focus(element.clone()));
        true
    }

    fn show_field_error(&self, field: FormField, message: Option<&str>) {
        self.record(ViewCall::FieldError(field, message.map(str::to_string)));
    }

    fn show_form_status(&self, status: Option<&FormStatus>) {
        self.record(ViewCall::FormStatus(status.cloned()));
    }

    fn set_submit_busy(&self, busy: bool) {
        self.record(ViewCall::SubmitBusy(busy));
    }

    fn clear_form(&self) {
        self.record(ViewCall::ClearForm);
    }

    fn set_faq_expanded(&self, index: usize, expanded: bool) {
        self.record(ViewCall::FaqExpanded(index, expanded));
    }

    fn set_header_scrolled(&self, scrolled: bool) {
        self.record(ViewCall::HeaderScrolled(scrolled));
    }
}

struct PendingTask {
    due: Duration,
    seq: u64,
    handle: TaskHandle,
    task: DeferredTask,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

/// Scheduler driven by hand: tasks run only when time is advanced past them.
#[derive(Default)]
pub struct ManualScheduler {
    clock: Mutex<ManualClock>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualClock> {
        self.clock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn pending(&self) -> usize {
        self.lock()
            .pending
            .iter()
            .filter(|task| !task.handle.is_cancelled())
            .count()
    }

    /// Runs every task due within `by`, in due order. Tasks run without the
    /// clock lock held so they may schedule more work.
    pub fn advance(&self, by: Duration) {
        let target = self.lock().now + by;
        loop {
            let next = {
                let mut clock = self.lock();
                let index = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due <= target)
                    .min_by_key(|(_, task)| (task.due, task.seq))
                    .map(|(index, _)| index);
                match index {
                    Some(index) => {
                        let task = clock.pending.remove(index);
                        clock.now = task.due;
                        Some(task)
                    }
                    None => None,
                }
            };

            let Some(task) = next else { break };
            if !task.handle.is_cancelled() {
                (task.task)();
            }
        }
        self.lock().now = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) -> TaskHandle {
        let handle = TaskHandle::new();
        let mut clock = self.lock();
        let due = clock.now + delay;
        let seq = clock.next_seq;
        clock.next_seq += 1;
        clock.pending.push(PendingTask {
            due,
            seq,
            handle: handle.clone(),
            task,
        });
        handle
    }
}

#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Accept,
    Fail(String),
    Panic(String),
}

/// Submission service with a fixed response and an optional gate that holds
/// every call until notified.
pub struct ScriptedService {
    response: ScriptedResponse,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    received: Mutex<Vec<ContactSubmission>>,
}

impl ScriptedService {
    pub fn new(response: ScriptedResponse) -> Self {
        Self {
            response,
            gate: None,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Self {
        Self::new(ScriptedResponse::Accept)
    }

    pub fn failing(message: &str) -> Self {
        Self::new(ScriptedResponse::Fail(message.to_string()))
    }

    pub fn panicking(message: &str) -> Self {
        Self::new(ScriptedResponse::Panic(message.to_string()))
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<ContactSubmission> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl SubmissionService for ScriptedService {
    async fn submit(&self, submission: &ContactSubmission) -> Result<SubmissionReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(submission.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.response {
            ScriptedResponse::Accept => Ok(SubmissionReceipt::generated()),
            ScriptedResponse::Fail(message) => Err(anyhow!(message.clone())),
            ScriptedResponse::Panic(message) => panic!("{message}"),
        }
    }
}
