//! Request sink - the seam between a placement and the ad network.

use std::fmt;

use super::AdError;

/// The fill-request marker pushed to the ad network queue.
///
/// Carries no data: it asks the network to fill the most recently
/// declared placeholder. Serializes as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillRequest;

impl fmt::Display for FillRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{}")
    }
}

/// Somewhere fill requests can be submitted.
///
/// Implementations report [`AdError::AdNetworkUnavailable`] when the
/// network is absent (blocked script, offline page); the controller treats
/// that as retryable rather than fatal.
pub trait RequestSink {
    fn submit(&self, request: FillRequest) -> Result<(), AdError>;
}

