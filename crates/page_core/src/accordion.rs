use std::sync::Arc;

use crate::view::PageView;

/// FAQ items expand and collapse independently of each other.
pub struct FaqAccordion {
    expanded: Vec<bool>,
    view: Arc<dyn PageView>,
}

impl FaqAccordion {
    pub fn new(item_count: usize, view: Arc<dyn PageView>) -> Self {
        for index in 0..item_count {
            view.set_faq_expanded(index, false);
        }
        Self {
            expanded: vec![false; item_count],
            view,
        }
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    /// Returns the new expanded state, or `None` for an unknown item.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let Some(expanded) = self.expanded.get_mut(index) else {
            tracing::warn!(index, items = self.expanded.len(), "ignoring toggle for unknown faq item");
            return None;
        };
        *expanded = !*expanded;
        self.view.set_faq_expanded(index, *expanded);
        tracing::debug!(index, expanded = *expanded, "faq item toggled");
        Some(*expanded)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{RecordingView, ViewCall};

    use super::*;

    #[test]
    fn items_toggle_independently() {
        let view = Arc::new(RecordingView::new());
        let mut faq = FaqAccordion::new(3, view.clone());

        assert_eq!(faq.toggle(0), Some(true));
        assert_eq!(faq.toggle(2), Some(true));
        assert!(faq.is_expanded(0));
        assert!(!faq.is_expanded(1));
        assert_eq!(faq.toggle(0), Some(false));

        assert_eq!(
            view.calls().last(),
            Some(&ViewCall::FaqExpanded(0, false))
        );
    }

    #[test]
    fn unknown_item_is_ignored() {
        let view = Arc::new(RecordingView::new());
        let mut faq = FaqAccordion::new(2, view.clone());
        view.clear_calls();

        assert_eq!(faq.toggle(7), None);
        assert!(view.calls().is_empty());
    }
}
