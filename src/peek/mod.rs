//! # Stateful peek operator.
//!
//! Decorates a [`Publisher`](crate::Publisher) so side-effecting hooks observe
//! every lifecycle signal while carrying one piece of mutable state per
//! subscription.
//!
//! ## Contents
//! - [`StatefulPeek`] the publisher decorator; validates its source at construction
//! - [`StatefulPeekBuilder`] fluent construction
//! - [`PeekStatefulSubscriber`] the per-subscription state machine
//! - [`hooks`] hook types and boxing helpers for [`StatefulPeek::new`]
//! - [`logged`] ready-made peek that logs every signal
//!
//! ## Data flow
//! ```text
//! signals:   source ──► PeekStatefulSubscriber ──(hooks)──► consumer
//! demand:    source ◄── PeekStatefulSubscriber ◄──────────── consumer (request / cancel)
//! ```

mod builder;
pub mod hooks;
mod log;
mod operator;
mod subscriber;

pub use builder::StatefulPeekBuilder;
pub use hooks::Hooks;
pub use log::logged;
pub use operator::StatefulPeek;
pub use subscriber::PeekStatefulSubscriber;
