//! # spark-showcase
//!
//! A portfolio page rendered from Rust: a layout shell, an in-article ad
//! unit with a managed lifecycle, and a live demo panel of highlighted code.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Elements live in a thread-local registry and are addressed by
//! [`ElementId`]. Components create elements under the current parent
//! context and hand back a cleanup (or a handle) that releases them.
//!
//! ```text
//! mount_page → header / main(content, article + ad_unit, live demo) / footer
//!                                       │
//!                     AdSlotController ─┴─ load signal → ins placeholder → ad queue
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Colors and text attributes
//! - [`dom`] - Element tree, parent context, markup
//! - [`host`] - Page load signal and the ad network queue
//! - [`ads`] - Placement config, slot controller, ad unit component
//! - [`demo`] - Snippets, highlighting, clipboard, live demo view
//! - [`page`] - Page configuration and layout

pub mod ads;
pub mod demo;
pub mod dom;
pub mod host;
pub mod page;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use dom::{Cleanup, DomError, ElementId};

pub use ads::{
    ad_unit, AdError, AdFormat, AdSlotController, AdUnitProps, ContainerHandle, FillRequest,
    PlacementConfig, RequestSink, SlotStatus,
};

pub use host::{dispatch_load, install_ad_queue, is_loaded, ReadyState};

pub use demo::{mount_live_demo, DemoViewer, LiveDemoHandle};

pub use page::{mount_page, PageHandle, ShowcaseConfig};
