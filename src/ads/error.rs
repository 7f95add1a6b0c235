//! Error types for ad placements.
//!
//! None of these escape [`AdSlotController`](super::AdSlotController): the
//! controller logs them and carries on, since ads are an optional
//! enhancement of the page. They are public so custom
//! [`RequestSink`](super::RequestSink) implementations can report failures.

use thiserror::Error;

use crate::dom::DomError;

/// # Errors produced while preparing or submitting an ad request.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdError {
    /// Publisher id or slot id is empty; the placement is skipped.
    #[error("placement config incomplete: missing {missing}")]
    ConfigIncomplete {
        /// Name of the first missing field.
        missing: &'static str,
    },

    /// The ad network's request queue is not present on the page.
    #[error("ad network request queue unavailable")]
    AdNetworkUnavailable,

    /// Manipulating the container failed.
    #[error("container operation failed: {0}")]
    Dom(#[from] DomError),

    /// A format name that is not `auto`, `fluid` or `rectangle`.
    #[error("unknown ad format {0:?}")]
    UnknownFormat(String),
}

impl AdError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use spark_showcase::ads::AdError;
    ///
    /// assert_eq!(AdError::AdNetworkUnavailable.as_label(), "ad_network_unavailable");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            AdError::ConfigIncomplete { .. } => "ad_config_incomplete",
            AdError::AdNetworkUnavailable => "ad_network_unavailable",
            AdError::Dom(_) => "ad_dom_operation_failed",
            AdError::UnknownFormat(_) => "ad_unknown_format",
        }
    }

    /// Whether a later load signal may succeed where this attempt failed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AdError::AdNetworkUnavailable)
    }
}
