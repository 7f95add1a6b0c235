//! Ad placements.
//!
//! - [`PlacementConfig`] - what to request
//! - [`AdSlotController`] - when to request it, and how to clean up
//! - [`RequestSink`] - where fill requests go
//! - [`ad_unit`] - the page component wrapping all of the above

mod config;
mod controller;
mod error;
mod sink;
mod unit;

pub use config::{AdFormat, PlacementConfig};
pub use controller::{AdSlotController, ContainerHandle, SlotStatus};
pub use error::AdError;
pub use sink::{FillRequest, RequestSink};
pub use unit::{ad_unit, ad_unit_with_sink, AdUnitProps, CONTAINER_MIN_HEIGHT};
