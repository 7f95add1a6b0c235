//! Page composition.
//!
//! - [`ShowcaseConfig`] - site title and ad placement, overridable from the environment
//! - [`mount_page`] - build the full page and get a [`PageHandle`] back

mod config;
mod layout;

pub use config::{ShowcaseConfig, ENV_AD_CLIENT, ENV_AD_FORMAT, ENV_AD_LAYOUT, ENV_AD_SLOT};
pub use layout::{mount_page, mount_page_with_sink, PageHandle};
