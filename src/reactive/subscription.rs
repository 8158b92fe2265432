//! # Subscription handle.

/// Per-consumer handle used to request elements or cancel.
///
/// May be called from a different thread than the one delivering signals.
pub trait Subscription: Send + Sync {
    /// Requests up to `n` more elements.
    fn request(&self, n: u64);

    /// Stops the flow of signals; further requests are ignored.
    fn cancel(&self);
}

/// Subscription that never produces anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptySubscription;

impl Subscription for EmptySubscription {
    fn request(&self, _n: u64) {}

    fn cancel(&self) {}
}
