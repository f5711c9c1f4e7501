//! Terminal rendering of the page: each view call becomes one output line, and
//! the form draft plus history stack live here the way a document would hold
//! them.

use std::{
    collections::BTreeSet,
    io::Write,
    sync::{Arc, Mutex},
};

use page_core::{ElementId, FormStatus, PageView};
use shared::{
    domain::{FormField, SectionId},
    protocol::ContactForm,
};

pub const CLOSE_CONTROL: &str = "sidebar-close";
pub const MENU_TOGGLE: &str = "menu-toggle";

type Sink = Arc<Mutex<dyn Write + Send>>;

#[derive(Debug, Default)]
struct History {
    entries: Vec<Option<String>>,
    cursor: usize,
}

impl History {
    fn new(initial: Option<String>) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    fn push(&mut self, fragment: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Some(fragment.to_string()));
        self.cursor = self.entries.len() - 1;
    }
}

#[derive(Debug, Default)]
struct ConsoleState {
    title: String,
    active: Option<SectionId>,
    sidebar_open: bool,
    scroll_locked: bool,
    focused: Option<ElementId>,
    busy: bool,
    status: Option<FormStatus>,
    draft: ContactForm,
    faq_expanded: BTreeSet<usize>,
    history: History,
}

pub struct ConsoleView {
    state: Mutex<ConsoleState>,
    out: Sink,
}

impl ConsoleView {
    pub fn stdout(location_fragment: Option<String>) -> Self {
        Self::with_sink(location_fragment, Arc::new(Mutex::new(std::io::stdout())))
    }

    pub fn with_sink(location_fragment: Option<String>, out: Sink) -> Self {
        Self {
            state: Mutex::new(ConsoleState {
                history: History::new(location_fragment),
                ..ConsoleState::default()
            }),
            out,
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, ConsoleState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, line: impl AsRef<str>) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(err) = writeln!(out, "{}", line.as_ref()) {
            tracing::warn!(error = %err, "failed to write view output");
        }
    }

    pub fn set_field(&self, field: FormField, value: &str) {
        self.state().draft.set(field, value.to_string());
    }

    pub fn form_snapshot(&self) -> ContactForm {
        self.state().draft.clone()
    }

    /// Moves one entry back; returns the new entry's fragment, or `None` when
    /// already at the oldest entry.
    pub fn back(&self) -> Option<Option<String>> {
        let mut state = self.state();
        if state.history.cursor == 0 {
            return None;
        }
        state.history.cursor -= 1;
        Some(state.history.entries[state.history.cursor].clone())
    }

    pub fn forward(&self) -> Option<Option<String>> {
        let mut state = self.state();
        if state.history.cursor + 1 >= state.history.entries.len() {
            return None;
        }
        state.history.cursor += 1;
        Some(state.history.entries[state.history.cursor].clone())
    }

    pub fn render_summary(&self) {
        let lines = {
            let state = self.state();
            let mut lines = vec![
                format!("title: {}", state.title),
                format!(
                    "section: {}",
                    state.active.map(|s| s.as_str()).unwrap_or("-")
                ),
                format!(
                    "sidebar: {}{}",
                    if state.sidebar_open { "open" } else { "closed" },
                    if state.scroll_locked { " (scroll locked)" } else { "" }
                ),
                format!(
                    "focus: {}",
                    state
                        .focused
                        .as_ref()
                        .map(ElementId::as_str)
                        .unwrap_or("-")
                ),
            ];
            for field in FormField::ALL {
                lines.push(format!("  {}: {}", field.key(), state.draft.value(field)));
            }
            if state.busy {
                lines.push("submit: sending".to_string());
            }
            if let Some(status) = &state.status {
                lines.push(format!("status: {}", status.message()));
            }
            lines
        };
        for line in lines {
            self.emit(line);
        }
    }
}

impl PageView for ConsoleView {
    fn set_title(&self, title: &str) {
        self.state().title = title.to_string();
        self.emit(format!("[title] {title}"));
    }

    fn scroll_to_top(&self) {
        self.emit("[scroll] top");
    }

    fn set_section_active(&self, section: SectionId, active: bool) {
        {
            let mut state = self.state();
            if active {
                state.active = Some(section);
            } else if state.active == Some(section) {
                state.active = None;
            }
        }
        if active {
            self.emit(format!("[section] {section} shown"));
        }
    }

    fn push_history(&self, fragment: &str) {
        self.state().history.push(fragment);
        self.emit(format!("[history] {fragment}"));
    }

    fn announce(&self, message: &str) {
        self.emit(format!("[announce] {message}"));
    }

    fn set_sidebar_open(&self, open: bool) {
        self.state().sidebar_open = open;
        self.emit(format!(
            "[sidebar] {}",
            if open { "open" } else { "closed" }
        ));
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.state().scroll_locked = locked;
    }

    fn sidebar_focusables(&self) -> Vec<ElementId> {
        std::iter::once(CLOSE_CONTROL.to_string())
            .chain(SectionId::ALL.iter().map(|s| format!("nav-{s}")))
            .map(ElementId::new)
            .collect()
    }

    fn sidebar_close_control(&self) -> Option<ElementId> {
        Some(ElementId::from(CLOSE_CONTROL))
    }

    fn focused_element(&self) -> Option<ElementId> {
        self.state().focused.clone()
    }

    fn focus(&self, element: &ElementId) -> bool {
        self.state().focused = Some(element.clone());
        self.emit(format!("[focus] {element}"));
        true
    }

    fn show_field_error(&self, field: FormField, message: Option<&str>) {
        if let Some(message) = message {
            self.emit(format!("[field {}] {message}", field.key()));
        }
    }

    fn show_form_status(&self, status: Option<&FormStatus>) {
        self.state().status = status.cloned();
        match status {
            Some(FormStatus::Success(message)) => self.emit(format!("[status ok] {message}")),
            Some(FormStatus::Error(message)) => self.emit(format!("[status error] {message}")),
            None => {}
        }
    }

    fn set_submit_busy(&self, busy: bool) {
        self.state().busy = busy;
        self.emit(if busy {
            "[submit] Sending..."
        } else {
            "[submit] Send Message"
        });
    }

    fn clear_form(&self) {
        self.state().draft = ContactForm::default();
    }

    fn set_faq_expanded(&self, index: usize, expanded: bool) {
        let changed = {
            let mut state = self.state();
            if expanded {
                state.faq_expanded.insert(index)
            } else {
                state.faq_expanded.remove(&index)
            }
        };
        if changed {
            self.emit(format!(
                "[faq {index}] {}",
                if expanded { "expanded" } else { "collapsed" }
            ));
        }
    }

    fn set_header_scrolled(&self, scrolled: bool) {
        self.emit(format!(
            "[header] {}",
            if scrolled { "scrolled" } else { "top" }
        ));
    }
}

#[cfg(test)]
#[path = "tests/console_view_tests.rs"]
mod tests;
