use std::sync::Arc;

use crate::view::PageView;

/// Tracks whether the page has scrolled past the header threshold.
pub struct ScrollHeader {
    threshold: f64,
    scrolled: bool,
    view: Arc<dyn PageView>,
}

impl ScrollHeader {
    pub fn new(threshold: f64, view: Arc<dyn PageView>) -> Self {
        Self {
            threshold,
            scrolled: false,
            view,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Returns whether the header state changed.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        let scrolled = offset > self.threshold;
        if scrolled == self.scrolled {
            return false;
        }
        self.scrolled = scrolled;
        self.view.set_header_scrolled(scrolled);
        true
    }
}
