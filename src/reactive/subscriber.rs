//! # Subscriber trait.
//!
//! Signals for one subscription are serialized by the publisher, so every
//! method takes `&mut self` and needs no internal locking.

use std::sync::Arc;

use crate::error::{Fatal, StreamError};

use super::subscription::Subscription;

/// Outcome of delivering one signal.
///
/// `Err` carries a fatal error that must propagate to whoever delivered the signal.
pub type Signal = Result<(), Fatal>;

/// Consumer of a typed element sequence.
pub trait Subscriber<T>: Send {
    /// Receives the subscription handle. Always the first signal.
    fn on_subscribe(&mut self, subscription: Arc<dyn Subscription>) -> Signal;

    /// Receives one element.
    fn on_next(&mut self, item: T) -> Signal;

    /// Receives the terminal error.
    fn on_error(&mut self, error: StreamError) -> Signal;

    /// Receives the terminal completion.
    fn on_complete(&mut self) -> Signal;
}
