//! Events delivered to the page controller and what came of them.

use shared::protocol::ContactForm;
use tokio::task::JoinHandle;

use crate::{navigation::NavigationOutcome, submission::SubmitOutcome, view::ElementId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Other(String),
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum PageEvent {
    /// A navigation link or button naming a section.
    NavClick { target: String },
    /// Back/forward; carries the fragment of the new location, if any.
    HistoryChanged { fragment: Option<String> },
    ToggleSidebar { trigger: Option<ElementId> },
    /// Close button or overlay.
    CloseSidebar,
    KeyDown { key: Key, shift: bool },
    Scroll { offset: f64 },
    FaqToggle { index: usize },
    Submit { form: ContactForm },
}

impl PageEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::NavClick { .. } => "nav_click",
            PageEvent::HistoryChanged { .. } => "history_changed",
            PageEvent::ToggleSidebar { .. } => "toggle_sidebar",
            PageEvent::CloseSidebar => "close_sidebar",
            PageEvent::KeyDown { .. } => "key_down",
            PageEvent::Scroll { .. } => "scroll",
            PageEvent::FaqToggle { .. } => "faq_toggle",
            PageEvent::Submit { .. } => "submit",
        }
    }
}

#[derive(Debug)]
pub enum Dispatched {
    Navigated(NavigationOutcome),
    /// Invalid navigation target; state unchanged.
    NavigationRejected,
    Sidebar { open: bool },
    /// Whether the key's default action should be prevented.
    Key { prevent_default: bool },
    HeaderChanged(bool),
    FaqToggled(Option<bool>),
    /// The attempt runs on the runtime; the rest of the page stays live.
    SubmissionStarted(JoinHandle<SubmitOutcome>),
}
