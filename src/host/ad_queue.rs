//! Ad network queue - the page-wide request queue the network script polls.
//!
//! The queue only exists once the network script has been injected
//! (`install_ad_queue`). Until then, or after an ad blocker removes it,
//! submissions fail with [`AdError::AdNetworkUnavailable`].

use std::cell::RefCell;

use log::debug;

use crate::ads::{AdError, FillRequest, RequestSink};

thread_local! {
    /// `None` while the network script is absent.
    static AD_QUEUE: RefCell<Option<Vec<FillRequest>>> = const { RefCell::new(None) };
}

/// Make the queue available (the network script finished injecting).
/// Keeps any pending requests if already installed.
pub fn install_ad_queue() {
    AD_QUEUE.with(|q| {
        let mut q = q.borrow_mut();
        if q.is_none() {
            *q = Some(Vec::new());
        }
    });
}

/// Remove the queue, dropping pending requests.
pub fn uninstall_ad_queue() {
    AD_QUEUE.with(|q| *q.borrow_mut() = None);
}

/// Check if the queue is present.
pub fn is_ad_queue_installed() -> bool {
    AD_QUEUE.with(|q| q.borrow().is_some())
}

/// Pending requests not yet taken by the network.
pub fn ad_queue_len() -> usize {
    AD_QUEUE.with(|q| q.borrow().as_ref().map_or(0, Vec::len))
}

/// Take all pending requests (what the network script does when it polls).
pub fn drain_ad_queue() -> Vec<FillRequest> {
    AD_QUEUE.with(|q| {
        q.borrow_mut()
            .as_mut()
            .map(std::mem::take)
            .unwrap_or_default()
    })
}

/// [`RequestSink`] backed by the page-wide queue.
///
/// Looks the queue up on every submission, so a queue installed after the
/// controller was created is still picked up.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalAdQueue;

impl RequestSink for GlobalAdQueue {
    fn submit(&self, request: FillRequest) -> Result<(), AdError> {
        AD_QUEUE.with(|q| match q.borrow_mut().as_mut() {
            Some(queue) => {
                queue.push(request);
                debug!("fill request queued ({} pending)", queue.len());
                Ok(())
            }
            None => Err(AdError::AdNetworkUnavailable),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        uninstall_ad_queue();
    }

    #[test]
    fn test_submit_without_queue() {
        setup();

        assert!(!is_ad_queue_installed());
        assert_eq!(GlobalAdQueue.submit(FillRequest), Err(AdError::AdNetworkUnavailable));
        assert_eq!(ad_queue_len(), 0);
    }

    #[test]
    fn test_submit_and_drain() {
        setup();

        install_ad_queue();
        GlobalAdQueue.submit(FillRequest).unwrap();
        GlobalAdQueue.submit(FillRequest).unwrap();
        assert_eq!(ad_queue_len(), 2);

        assert_eq!(drain_ad_queue(), vec![FillRequest, FillRequest]);
        assert_eq!(ad_queue_len(), 0);
        assert!(is_ad_queue_installed());
    }

    #[test]
    fn test_install_keeps_pending() {
        setup();

        install_ad_queue();
        GlobalAdQueue.submit(FillRequest).unwrap();
        install_ad_queue();
        assert_eq!(ad_queue_len(), 1);

        uninstall_ad_queue();
        assert_eq!(ad_queue_len(), 0);
        assert!(drain_ad_queue().is_empty());
    }

    #[test]
    fn test_fill_request_wire_form() {
        assert_eq!(FillRequest.to_string(), "{}");
    }
}
