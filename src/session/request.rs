//! Single-outstanding-request discipline for a logical request channel.
//!
//! Each channel (search, detail) allows at most one request in flight.
//! Beginning a new request implicitly aborts the previous one, which
//! suppresses both its success and error paths — the supersession rule.

use futures_util::future::{AbortHandle, AbortRegistration};

/// Tracks the in-flight request of one logical channel.
///
/// `begin()` hands out an [`AbortRegistration`] to wrap the new request's
/// future in an [`Abortable`](futures_util::future::Abortable); the handle to
/// the previous request, if any, is aborted first. `cancel()` aborts without
/// starting a successor (query cleared, selection dismissed).
#[derive(Debug, Default)]
pub struct RequestSlot {
    in_flight: Option<AbortHandle>,
}

impl RequestSlot {
    /// Creates an empty slot with no request in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new logical request, aborting any previous one.
    ///
    /// The returned registration must wrap the request future; a future that
    /// is never wrapped cannot be superseded.
    pub fn begin(&mut self) -> AbortRegistration {
        if let Some(previous) = self.in_flight.take() {
            tracing::debug!("aborting superseded request");
            previous.abort();
        }

        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(handle);
        registration
    }

    /// Aborts the in-flight request, if any, without starting a successor.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            tracing::debug!("cancelling in-flight request");
            handle.abort();
        }
    }
}
