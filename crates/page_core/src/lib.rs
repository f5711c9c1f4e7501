use std::time::Duration;

pub mod accordion;
pub mod controller;
pub mod header;
pub mod navigation;
pub mod scheduler;
pub mod sidebar;
pub mod submission;
pub mod validation;
pub mod view;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use controller::{Dispatched, Key, PageController, PageDeps, PageEvent};
pub use navigation::{NavigationController, NavigationOutcome, StartupSource};
pub use scheduler::{Scheduler, TaskHandle, TokioScheduler};
pub use sidebar::{FocusTrap, SidebarController, TabDecision};
pub use submission::{
    HttpSubmissionService, PipelinePhase, SimulatedSubmissionService, SubmissionError,
    SubmissionPipeline, SubmissionService, SubmitOutcome,
};
pub use view::{ElementId, FormStatus, PageView};

pub const DEFAULT_SIDEBAR_FOCUS_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_SUCCESS_MESSAGE_TTL: Duration = Duration::from_secs(5);
pub const DEFAULT_HEADER_SCROLL_THRESHOLD: f64 = 50.0;
pub const DEFAULT_FAQ_ITEMS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub sidebar_focus_delay: Duration,
    pub success_message_ttl: Duration,
    pub header_scroll_threshold: f64,
    pub faq_items: usize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            sidebar_focus_delay: DEFAULT_SIDEBAR_FOCUS_DELAY,
            success_message_ttl: DEFAULT_SUCCESS_MESSAGE_TTL,
            header_scroll_threshold: DEFAULT_HEADER_SCROLL_THRESHOLD,
            faq_items: DEFAULT_FAQ_ITEMS,
        }
    }
}
