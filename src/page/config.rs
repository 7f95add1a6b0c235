//! Page configuration.
//!
//! Defaults carry the page's live placement. Each field can be overridden
//! from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SHOWCASE_AD_CLIENT` | `publisher_id` |
//! | `SHOWCASE_AD_SLOT` | `slot_id` |
//! | `SHOWCASE_AD_FORMAT` | `format` (`auto`, `fluid`, `rectangle`) |
//! | `SHOWCASE_AD_LAYOUT` | `layout` |

use log::warn;

use crate::ads::{AdFormat, AdUnitProps};

pub const ENV_AD_CLIENT: &str = "SHOWCASE_AD_CLIENT";
pub const ENV_AD_SLOT: &str = "SHOWCASE_AD_SLOT";
pub const ENV_AD_FORMAT: &str = "SHOWCASE_AD_FORMAT";
pub const ENV_AD_LAYOUT: &str = "SHOWCASE_AD_LAYOUT";

const AD_CLASS: &str = "my-12 bg-white rounded-xl shadow-sm overflow-hidden border border-gray-100";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseConfig {
    pub site_title: String,
    pub publisher_id: String,
    pub slot_id: String,
    pub format: AdFormat,
    pub layout: String,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            site_title: "AI Code Assistant".to_string(),
            publisher_id: "ca-pub-4546141241525552".to_string(),
            slot_id: "1122334455".to_string(),
            format: AdFormat::Auto,
            layout: "in-article".to_string(),
        }
    }
}

impl ShowcaseConfig {
    /// Defaults overridden by `SHOWCASE_AD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// Unset variables keep the default. An unparseable format keeps the
    /// default and logs a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(client) = lookup(ENV_AD_CLIENT) {
            config.publisher_id = client;
        }
        if let Some(slot) = lookup(ENV_AD_SLOT) {
            config.slot_id = slot;
        }
        if let Some(layout) = lookup(ENV_AD_LAYOUT) {
            config.layout = layout;
        }
        if let Some(raw) = lookup(ENV_AD_FORMAT) {
            match raw.parse::<AdFormat>() {
                Ok(format) => config.format = format,
                Err(err) => warn!(
                    "{ENV_AD_FORMAT}: {err}; keeping {} [{}]",
                    config.format,
                    err.as_label()
                ),
            }
        }

        config
    }

    /// Props for the in-article ad unit.
    pub fn ad_unit_props(&self) -> AdUnitProps {
        AdUnitProps::new(self.publisher_id.clone(), self.slot_id.clone())
            .with_layout(self.layout.clone())
            .with_format(self.format)
            .with_class_name(AD_CLASS)
    }
}
