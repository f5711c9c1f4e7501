//! Capability interface between the controllers and whatever renders the page.

use std::fmt;

use shared::domain::{FormField, SectionId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Success(String),
    Error(String),
}

impl FormStatus {
    pub fn message(&self) -> &str {
        match self {
            FormStatus::Success(message) | FormStatus::Error(message) => message,
        }
    }
}

/// Everything the controllers need from the document, history and
/// assistive-technology surfaces.
///
/// Implementations own rendering details: ARIA attributes follow
/// `set_sidebar_open`/`set_faq_expanded`, and announcements are removed by the
/// view after a short delay.
pub trait PageView: Send + Sync {
    fn set_title(&self, title: &str);
    fn scroll_to_top(&self);
    fn set_section_active(&self, section: SectionId, active: bool);
    /// Adds a history entry for `fragment` without reloading the page.
    fn push_history(&self, fragment: &str);
    fn announce(&self, message: &str);

    fn set_sidebar_open(&self, open: bool);
    fn set_scroll_locked(&self, locked: bool);
    fn sidebar_focusables(&self) -> Vec<ElementId>;
    fn sidebar_close_control(&self) -> Option<ElementId>;
    fn focused_element(&self) -> Option<ElementId>;
    /// Returns `false` when the element no longer exists or cannot take focus.
    fn focus(&self, element: &ElementId) -> bool;

    fn show_field_error(&self, field: FormField, message: Option<&str>);
    fn show_form_status(&self, status: Option<&FormStatus>);
    fn set_submit_busy(&self, busy: bool);
    fn clear_form(&self);

    fn set_faq_expanded(&self, index: usize, expanded: bool);
    fn set_header_scrolled(&self, scrolled: bool);
}
