//! # Publisher trait.

use super::subscriber::{Signal, Subscriber};

/// Producer of a typed element sequence.
///
/// A publisher must call `on_subscribe` before any other signal, emit no more
/// elements than requested, and deliver at most one terminal signal.
///
/// A [`Fatal`](crate::Fatal) returned by the subscriber while the publisher is
/// delivering signals inside `subscribe` must be returned from `subscribe`.
pub trait Publisher<T>: Send + Sync {
    /// Attaches `subscriber` to this publisher.
    fn subscribe(&self, subscriber: Box<dyn Subscriber<T>>) -> Signal;
}
