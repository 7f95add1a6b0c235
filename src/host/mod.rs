//! Host environment - what the page gets from the browser around it.
//!
//! - [`load`] - readiness state and the load signal
//! - [`ad_queue`] - the ad network's page-wide request queue

pub mod ad_queue;
pub mod load;

pub use ad_queue::{
    ad_queue_len, drain_ad_queue, install_ad_queue, is_ad_queue_installed, uninstall_ad_queue,
    GlobalAdQueue,
};
pub use load::{
    dispatch_load, is_loaded, listener_count, mark_interactive, on_load, ready_state,
    ready_state_signal, LoadHandler, ReadyState,
};

/// Reset readiness, listeners and the ad queue (for testing).
pub fn reset_host() {
    load::reset_load_state();
    ad_queue::uninstall_ad_queue();
}
