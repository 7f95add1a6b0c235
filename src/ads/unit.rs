//! Ad Unit - the component that owns an ad container on the page.
//!
//! Creates a wrapper and an inner container under the current parent
//! context, drives an [`AdSlotController`] against the container, and
//! returns a cleanup that unbinds the slot and releases both elements.
//!
//! # Example
//!
//! ```ignore
//! use spark_showcase::ads::{ad_unit, AdUnitProps, AdFormat};
//!
//! let cleanup = ad_unit(
//!     AdUnitProps::new("ca-pub-4546141241525552", "1122334455")
//!         .with_format(AdFormat::Auto)
//!         .with_class_name("my-12 rounded-xl"),
//! );
//!
//! // Unmount
//! cleanup();
//! ```

use std::rc::Rc;

use log::warn;

use crate::dom::{self, Cleanup, DomError, ElementId};
use super::{AdFormat, AdSlotController, PlacementConfig, RequestSink};
use crate::host::GlobalAdQueue;

/// Minimum height reserved for the ad so the page does not jump when it fills.
pub const CONTAINER_MIN_HEIGHT: &str = "280px";

/// Properties for [`ad_unit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdUnitProps {
    pub publisher_id: String,
    pub slot_id: String,
    pub layout: String,
    pub format: AdFormat,
    /// Extra classes for the wrapper.
    pub class_name: String,
}

impl AdUnitProps {
    pub fn new(publisher_id: impl Into<String>, slot_id: impl Into<String>) -> Self {
        Self {
            publisher_id: publisher_id.into(),
            slot_id: slot_id.into(),
            layout: PlacementConfig::DEFAULT_LAYOUT.to_string(),
            format: AdFormat::default(),
            class_name: String::new(),
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn with_format(mut self, format: AdFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Ad units always request full-width responsive ads.
    pub fn placement(&self) -> PlacementConfig {
        PlacementConfig::new(self.publisher_id.clone(), self.slot_id.clone())
            .with_layout(self.layout.clone())
            .with_format(self.format)
            .with_responsive(true)
    }
}

/// Create an ad unit that submits to the page-wide ad queue.
pub fn ad_unit(props: AdUnitProps) -> Cleanup {
    ad_unit_with_sink(props, Rc::new(GlobalAdQueue))
}

/// Create an ad unit that submits to `sink`.
pub fn ad_unit_with_sink(props: AdUnitProps, sink: Rc<dyn RequestSink>) -> Cleanup {
    let wrapper = dom::create_element("div");
    let container = dom::with_parent(wrapper, || dom::create_element("div"));

    if let Err(err) = decorate(wrapper, container, &props) {
        warn!("ad unit decoration failed [{}]: {err}", err.as_label());
    }

    let controller = AdSlotController::new(sink);
    controller.attach(props.placement()).bind(container);

    Box::new(move || {
        controller.detach();
        drop(controller);
        dom::release_element(wrapper);
    })
}

fn decorate(wrapper: ElementId, container: ElementId, props: &AdUnitProps) -> Result<(), DomError> {
    let class = if props.class_name.is_empty() {
        "min-h-[100px]".to_string()
    } else {
        format!("min-h-[100px] {}", props.class_name)
    };
    dom::set_class(wrapper, &class)?;

    dom::set_class(container, "w-full h-full")?;
    dom::set_attribute(container, "aria-label", "Advertisement")?;
    dom::set_style(container, "min-height", CONTAINER_MIN_HEIGHT)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host;

    fn setup() {
        dom::reset_dom();
        host::reset_host();
    }

    fn find_container() -> Option<ElementId> {
        (0..dom::element_count() + 8)
            .map(ElementId)
            .find(|id| dom::attribute(*id, "aria-label").as_deref() == Some("Advertisement"))
    }

    #[test]
    fn test_ad_unit_structure() {
        setup();
        host::install_ad_queue();
        host::dispatch_load();

        let page = dom::create_element("main");
        let cleanup = dom::with_parent(page, || {
            ad_unit(
                AdUnitProps::new("ca-pub-4546141241525552", "1122334455")
                    .with_format(AdFormat::Auto)
                    .with_class_name("my-12"),
            )
        });

        let wrapper = dom::children(page)[0];
        assert_eq!(dom::class(wrapper).as_deref(), Some("min-h-[100px] my-12"));

        let container = find_container().unwrap();
        assert_eq!(dom::parent(container), Some(wrapper));
        assert_eq!(dom::style(container, "min-height").as_deref(), Some("280px"));

        let ins = dom::children(container);
        assert_eq!(ins.len(), 1);
        assert_eq!(dom::attribute(ins[0], "data-ad-format").as_deref(), Some("auto"));
        assert_eq!(host::ad_queue_len(), 1);

        cleanup();
        assert!(dom::children(page).is_empty());
        assert!(!dom::is_allocated(wrapper));
        assert!(!dom::is_allocated(container));
    }

    #[test]
    fn test_cleanup_before_load_cancels() {
        setup();
        host::install_ad_queue();

        let cleanup = ad_unit(AdUnitProps::new("ca-pub-1", "42"));
        assert_eq!(host::listener_count(), 1);

        cleanup();
        assert_eq!(host::listener_count(), 0);

        host::dispatch_load();
        assert_eq!(host::ad_queue_len(), 0);
        assert_eq!(dom::element_count(), 0);
    }

    #[test]
    fn test_placement_is_responsive() {
        let props = AdUnitProps::new("p", "s").with_layout("in-feed");
        let placement = props.placement();
        assert!(placement.responsive);
        assert_eq!(placement.layout, "in-feed");
        assert_eq!(placement.format, AdFormat::Fluid);
    }
}
