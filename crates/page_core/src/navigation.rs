//! Section navigation synchronized with history, the document title and the
//! stored last-viewed preference.

use std::sync::Arc;

use shared::{
    domain::{SectionId, SectionRegistry},
    error::NavigationError,
};
use storage::PreferenceStore;
use url::Url;

use crate::view::PageView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Changed { from: SectionId, to: SectionId },
    Unchanged(SectionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupSource {
    Fragment,
    Preference,
    Default,
}

/// Extracts the fragment from either a full URL (`https://site/#faq`) or a
/// bare fragment (`#faq`). Empty fragments count as absent.
pub fn fragment_from_location(location: &str) -> Option<String> {
    let location = location.trim();
    let fragment = match Url::parse(location) {
        Ok(url) => url.fragment().map(str::to_string),
        Err(_) => location.strip_prefix('#').map(str::to_string),
    }?;
    (!fragment.is_empty()).then_some(fragment)
}

/// Picks the initial section: URL fragment, then stored preference, then the default.
pub fn resolve_initial_section(
    fragment: Option<&str>,
    preferences: &PreferenceStore,
) -> (SectionId, StartupSource) {
    if let Some(fragment) = fragment {
        match SectionId::parse_target(fragment) {
            Ok(section) => return (section, StartupSource::Fragment),
            Err(err) => tracing::warn!(fragment, "ignoring startup fragment: {err}"),
        }
    }

    if let Some(section) = preferences.last_section() {
        return (section, StartupSource::Preference);
    }

    (SectionId::DEFAULT, StartupSource::Default)
}

pub struct NavigationController {
    current: SectionId,
    registry: SectionRegistry,
    preferences: PreferenceStore,
    view: Arc<dyn PageView>,
}

impl NavigationController {
    /// Resolves the initial section and renders it. Startup only marks the
    /// section active and sets the title; it does not persist, push history,
    /// scroll or announce.
    pub fn start(
        registry: SectionRegistry,
        preferences: PreferenceStore,
        view: Arc<dyn PageView>,
        fragment: Option<&str>,
    ) -> Self {
        let (current, source) = resolve_initial_section(fragment, &preferences);
        tracing::info!(section = %current, ?source, "resolved initial section");

        for section in SectionId::ALL {
            view.set_section_active(section, section == current);
        }
        view.set_title(&registry.get(current).title);

        Self {
            current,
            registry,
            preferences,
            view,
        }
    }

    pub fn current(&self) -> SectionId {
        self.current
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn go_to(&mut self, target: &str) -> Result<NavigationOutcome, NavigationError> {
        let section = SectionId::parse_target(target).map_err(|err| {
            tracing::warn!(nav_target = target, current = %self.current, "rejected navigation: {err}");
            err
        })?;
        Ok(self.transition(section, true))
    }

    /// Back/forward handling. Resolves from the fragment alone; an absent or
    /// unusable fragment means the default section.
    pub fn on_history_change(&mut self, fragment: Option<&str>) -> NavigationOutcome {
        let section = match fragment.map(SectionId::parse_target) {
            Some(Ok(section)) => section,
            Some(Err(err)) => {
                tracing::warn!(?fragment, "history fragment unusable, using default: {err}");
                SectionId::DEFAULT
            }
            None => SectionId::DEFAULT,
        };
        self.transition(section, false)
    }

    fn transition(&mut self, to: SectionId, push_history: bool) -> NavigationOutcome {
        let from = self.current;
        if from == to {
            tracing::debug!(section = %to, "already on section");
            return NavigationOutcome::Unchanged(to);
        }

        self.view.set_section_active(from, false);
        self.view.set_section_active(to, true);
        self.current = to;

        self.preferences.remember_section(self.current);

        let section = self.registry.get(self.current);
        self.view.scroll_to_top();
        self.view.set_title(&section.title);
        self.view.announce(&format!("Navigated to {}", section.display_name));
        if push_history {
            self.view.push_history(&self.current.fragment());
        }

        tracing::info!(from = %from, to = %to, push_history, "navigated");
        NavigationOutcome::Changed { from, to }
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
