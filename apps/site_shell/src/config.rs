use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use page_core::PageSettings;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "site.toml";
const ENV_PREFIX: &str = "SITE__";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    pub state_dir: Option<PathBuf>,
    pub persist_preferences: bool,
    pub sidebar_focus_delay_ms: u64,
    pub success_message_ms: u64,
    pub header_scroll_threshold: f64,
    pub faq_items: usize,
    pub submission_endpoint: Option<String>,
    pub simulated_latency_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let page = PageSettings::default();
        Self {
            site_name: "Brightline".into(),
            state_dir: None,
            persist_preferences: true,
            sidebar_focus_delay_ms: page.sidebar_focus_delay.as_millis() as u64,
            success_message_ms: page.success_message_ttl.as_millis() as u64,
            header_scroll_threshold: page.header_scroll_threshold,
            faq_items: page.faq_items,
            submission_endpoint: None,
            simulated_latency_ms: 1000,
        }
    }
}

impl SiteConfig {
    pub fn page_settings(&self) -> PageSettings {
        PageSettings {
            sidebar_focus_delay: Duration::from_millis(self.sidebar_focus_delay_ms),
            success_message_ttl: Duration::from_millis(self.success_message_ms),
            header_scroll_threshold: self.header_scroll_threshold,
            faq_items: self.faq_items,
        }
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Configured state dir, else the platform data dir. `None` when neither
    /// can be determined.
    pub fn resolve_state_dir(&self) -> Option<PathBuf> {
        self.state_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("site_shell")))
    }
}

/// Defaults, then the config file, then `SITE__*` environment variables.
///
/// An explicitly named file must exist; the default `site.toml` is optional.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SiteConfig> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            read_config_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => SiteConfig::default(),
    };
    apply_env_overrides(&mut config, std::env::vars());
    Ok(config)
}

pub fn read_config_file(path: &Path) -> anyhow::Result<SiteConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

/// Unparseable numeric values are logged and skipped.
pub fn apply_env_overrides(
    config: &mut SiteConfig,
    vars: impl IntoIterator<Item = (String, String)>,
) {
    for (name, value) in vars {
        let Some(key) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        match key {
            "SITE_NAME" => config.site_name = value,
            "STATE_DIR" => config.state_dir = Some(PathBuf::from(value)),
            "SUBMISSION_ENDPOINT" => {
                config.submission_endpoint = (!value.trim().is_empty()).then_some(value)
            }
            "PERSIST_PREFERENCES" => {
                parse_into(&name, &value, &mut config.persist_preferences)
            }
            "SIDEBAR_FOCUS_DELAY_MS" => {
                parse_into(&name, &value, &mut config.sidebar_focus_delay_ms)
            }
            "SUCCESS_MESSAGE_MS" => parse_into(&name, &value, &mut config.success_message_ms),
            "HEADER_SCROLL_THRESHOLD" => {
                parse_into(&name, &value, &mut config.header_scroll_threshold)
            }
            "FAQ_ITEMS" => parse_into(&name, &value, &mut config.faq_items),
            "SIMULATED_LATENCY_MS" => {
                parse_into(&name, &value, &mut config.simulated_latency_ms)
            }
            _ => tracing::debug!(var = %name, "ignoring unknown config override"),
        }
    }
}

fn parse_into<T: std::str::FromStr>(name: &str, value: &str, slot: &mut T) {
    match value.trim().parse::<T>() {
        Ok(parsed) => *slot = parsed,
        Err(_) => tracing::warn!(var = %name, value, "ignoring unparseable config override"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
