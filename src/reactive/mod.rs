//! Push-based streaming protocol: publisher, subscriber, subscription.
//!
//! This module groups the three protocol roles the peek operator sits between.
//! Producers and consumers live outside this crate; they only need to implement
//! these traits.
//!
//! ## Contents
//! - [`Publisher`] accepts a subscriber and emits signals to it
//! - [`Subscriber`] receives `on_subscribe` / `on_next` / `on_error` / `on_complete`
//! - [`Subscription`] per-consumer handle for `request(n)` / `cancel()`
//! - [`EmptySubscription`] inert handle for consumers that will never receive data
//!
//! ## Signal order
//! ```text
//! on_subscribe ──► on_next* ──► (on_error | on_complete)?
//! ```
//! Each method returns [`Signal`]; `Err(Fatal)` escapes synchronously to the caller.

mod publisher;
mod subscriber;
mod subscription;

pub use publisher::Publisher;
pub use subscriber::{Signal, Subscriber};
pub use subscription::{EmptySubscription, Subscription};
