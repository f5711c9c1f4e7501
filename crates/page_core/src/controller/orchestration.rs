//! The page controller: one instance per page session, built at startup and
//! handed to the event loop.

use std::sync::Arc;

use shared::{domain::SectionRegistry, error::NavigationError, protocol::ContactForm};
use storage::PreferenceStore;
use tokio::task::JoinHandle;

use super::events::{Dispatched, Key, PageEvent};
use crate::{
    accordion::FaqAccordion,
    header::ScrollHeader,
    navigation::{NavigationController, NavigationOutcome},
    scheduler::Scheduler,
    sidebar::SidebarController,
    submission::{SubmissionPipeline, SubmissionService, SubmitOutcome},
    view::PageView,
    PageSettings,
};

pub struct PageDeps {
    pub view: Arc<dyn PageView>,
    pub scheduler: Arc<dyn Scheduler>,
    pub preferences: PreferenceStore,
    pub registry: SectionRegistry,
    pub service: Arc<dyn SubmissionService>,
}

pub struct PageController {
    navigation: NavigationController,
    sidebar: SidebarController,
    faq: FaqAccordion,
    header: ScrollHeader,
    pipeline: Arc<SubmissionPipeline>,
}

impl PageController {
    pub fn start(deps: PageDeps, settings: &PageSettings, fragment: Option<&str>) -> Self {
        let PageDeps {
            view,
            scheduler,
            preferences,
            registry,
            service,
        } = deps;

        let navigation = NavigationController::start(registry, preferences, view.clone(), fragment);
        let sidebar =
            SidebarController::new(view.clone(), scheduler.clone(), settings.sidebar_focus_delay);
        let faq = FaqAccordion::new(settings.faq_items, view.clone());
        let header = ScrollHeader::new(settings.header_scroll_threshold, view.clone());
        let pipeline = Arc::new(SubmissionPipeline::new(
            service,
            view,
            scheduler,
            settings.success_message_ttl,
        ));

        Self {
            navigation,
            sidebar,
            faq,
            header,
            pipeline,
        }
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn sidebar(&self) -> &SidebarController {
        &self.sidebar
    }

    pub fn faq(&self) -> &FaqAccordion {
        &self.faq
    }

    pub fn header(&self) -> &ScrollHeader {
        &self.header
    }

    pub fn pipeline(&self) -> &Arc<SubmissionPipeline> {
        &self.pipeline
    }

    /// Selecting a destination always closes the sidebar, even when the
    /// destination is the current section or is rejected.
    pub fn navigate(&mut self, target: &str) -> Result<NavigationOutcome, NavigationError> {
        self.sidebar.close();
        self.navigation.go_to(target)
    }

    /// Spawns the attempt so other events keep flowing while it awaits the
    /// service. Must be called from within a tokio runtime.
    pub fn submit(&self, form: ContactForm) -> JoinHandle<SubmitOutcome> {
        let pipeline = self.pipeline.clone();
        tokio::spawn(async move { pipeline.submit(form).await })
    }

    pub fn dispatch(&mut self, event: PageEvent) -> Dispatched {
        tracing::debug!(event = event.name(), "dispatching page event");
        match event {
            PageEvent::NavClick { target } => match self.navigate(&target) {
                Ok(outcome) => Dispatched::Navigated(outcome),
                Err(_) => Dispatched::NavigationRejected,
            },
            PageEvent::HistoryChanged { fragment } => {
                self.sidebar.close();
                Dispatched::Navigated(self.navigation.on_history_change(fragment.as_deref()))
            }
            PageEvent::ToggleSidebar { trigger } => Dispatched::Sidebar {
                open: self.sidebar.toggle(trigger),
            },
            PageEvent::CloseSidebar => {
                self.sidebar.close();
                Dispatched::Sidebar { open: false }
            }
            PageEvent::KeyDown { key, shift } => {
                let prevent_default = match key {
                    Key::Escape => self.sidebar.close(),
                    Key::Tab => self.sidebar.handle_tab(shift),
                    Key::Other(_) => false,
                };
                Dispatched::Key { prevent_default }
            }
            PageEvent::Scroll { offset } => {
                self.header.on_scroll(offset);
                Dispatched::HeaderChanged(self.header.is_scrolled())
            }
            PageEvent::FaqToggle { index } => Dispatched::FaqToggled(self.faq.toggle(index)),
            PageEvent::Submit { form } => Dispatched::SubmissionStarted(self.submit(form)),
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
