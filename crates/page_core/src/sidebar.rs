//! Slide-out navigation sidebar: open/closed state, scroll lock and a focus
//! trap that lives exactly as long as the sidebar is open.

use std::{sync::Arc, time::Duration};

use crate::{
    scheduler::{Scheduler, TaskHandle},
    view::{ElementId, PageView},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabDecision {
    /// Let the default tab order apply.
    Default,
    /// Suppress the default and move focus here.
    FocusInstead(ElementId),
    /// Suppress the default and keep focus where it is.
    Hold,
}

/// Confines tab navigation to a fixed list of elements, wrapping at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrap {
    focusables: Vec<ElementId>,
}

impl FocusTrap {
    pub fn new(focusables: Vec<ElementId>) -> Self {
        Self { focusables }
    }

    pub fn focusables(&self) -> &[ElementId] {
        &self.focusables
    }

    pub fn on_tab(&self, focused: Option<&ElementId>, backward: bool) -> TabDecision {
        let (Some(first), Some(last)) = (self.focusables.first(), self.focusables.last()) else {
            return TabDecision::Hold;
        };

        let inside = focused.is_some_and(|el| self.focusables.contains(el));
        if !inside {
            let entry = if backward { last } else { first };
            return TabDecision::FocusInstead(entry.clone());
        }

        match (backward, focused) {
            (true, Some(el)) if el == first => TabDecision::FocusInstead(last.clone()),
            (false, Some(el)) if el == last => TabDecision::FocusInstead(first.clone()),
            _ => TabDecision::Default,
        }
    }
}

struct OpenSidebar {
    trap: FocusTrap,
    opener: Option<ElementId>,
    pending_focus: Option<TaskHandle>,
}

enum SidebarState {
    Closed,
    Open(OpenSidebar),
}

pub struct SidebarController {
    view: Arc<dyn PageView>,
    scheduler: Arc<dyn Scheduler>,
    focus_delay: Duration,
    state: SidebarState,
}

impl SidebarController {
    pub fn new(
        view: Arc<dyn PageView>,
        scheduler: Arc<dyn Scheduler>,
        focus_delay: Duration,
    ) -> Self {
        Self {
            view,
            scheduler,
            focus_delay,
            state: SidebarState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SidebarState::Open(_))
    }

    pub fn focus_trap(&self) -> Option<&FocusTrap> {
        match &self.state {
            SidebarState::Open(open) => Some(&open.trap),
            SidebarState::Closed => None,
        }
    }

    /// Returns `false` if the sidebar was already open.
    pub fn open(&mut self, opener: Option<ElementId>) -> bool {
        if self.is_open() {
            tracing::debug!("sidebar already open");
            return false;
        }

        self.view.set_sidebar_open(true);
        self.view.set_scroll_locked(true);

        let trap = FocusTrap::new(self.view.sidebar_focusables());
        tracing::debug!(focusables = trap.focusables().len(), "installed focus trap");

        let pending_focus = self.view.sidebar_close_control().map(|target| {
            let view = self.view.clone();
            self.scheduler.schedule(
                self.focus_delay,
                Box::new(move || {
                    if !view.focus(&target) {
                        tracing::debug!(element = %target, "deferred sidebar focus target is gone");
                    }
                }),
            )
        });

        self.state = SidebarState::Open(OpenSidebar {
            trap,
            opener,
            pending_focus,
        });
        self.view.announce("Navigation menu opened");
        tracing::info!("sidebar opened");
        true
    }

    /// Returns `false` if the sidebar was already closed.
    pub fn close(&mut self) -> bool {
        let SidebarState::Open(open) = std::mem::replace(&mut self.state, SidebarState::Closed)
        else {
            return false;
        };

        if let Some(pending) = open.pending_focus {
            pending.cancel();
        }
        tracing::debug!(focusables = open.trap.focusables().len(), "released focus trap");

        self.view.set_sidebar_open(false);
        self.view.set_scroll_locked(false);
        if let Some(opener) = open.opener {
            if !self.view.focus(&opener) {
                tracing::debug!(element = %opener, "sidebar opener no longer focusable");
            }
        }
        self.view.announce("Navigation menu closed");
        tracing::info!("sidebar closed");
        true
    }

    pub fn toggle(&mut self, opener: Option<ElementId>) -> bool {
        if self.is_open() {
            self.close();
            false
        } else {
            self.open(opener);
            true
        }
    }

    /// Offers a Tab key press to the focus trap. Returns whether the default
    /// action should be prevented.
    pub fn handle_tab(&self, backward: bool) -> bool {
        let Some(trap) = self.focus_trap() else {
            return false;
        };

        match trap.on_tab(self.view.focused_element().as_ref(), backward) {
            TabDecision::Default => false,
            TabDecision::Hold => true,
            TabDecision::FocusInstead(target) => {
                if !self.view.focus(&target) {
                    tracing::debug!(element = %target, "focus trap target is gone");
                }
                true
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/sidebar_tests.rs"]
mod tests;
