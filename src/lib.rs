//! # stateful-peek
//!
//! **stateful-peek** is a signal-interception operator for push-based,
//! backpressured streaming pipelines (publisher / subscriber / subscription).
//!
//! It decorates an upstream publisher so that side-effecting hooks can observe
//! every lifecycle signal (subscribe, next, error, complete) while carrying one
//! piece of mutable state per subscription, created by a seed factory.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     consumer
//!        │ subscribe
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  StatefulPeek (publisher decorator)                               │
//! │  - source: Arc<dyn Publisher<T>>                                  │
//! │  - hooks:  seed / on_next / on_error / on_complete (all optional) │
//! │  - config: name, dropped-error callback                           │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        │ creates one per subscription
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  PeekStatefulSubscriber (state machine)                           │
//! │  - state: Option<S>      (seeded once, in on_subscribe)           │
//! │  - link:  parent + phase (shared with Probe and downstream)       │
//! │  - actual: downstream consumer                                    │
//! └──────┬──────────────────────────────────────────────▲─────────────┘
//!        │ source.subscribe(peek)                       │ request / cancel
//!        ▼                                              │ (passthrough)
//!     upstream ── on_subscribe / on_next / on_error / on_complete ──►
//! ```
//!
//! ### Hook failures
//! ```text
//! hook returns Err(HookError)
//!   ├─ Severity::Fatal       ──► Err(Fatal) from the signal call (and from subscribe)
//!   └─ Severity::Recoverable ──► exactly one on_error(StreamError) downstream
//!                                 ├─ on_next:     upstream cancelled, item dropped
//!                                 ├─ on_complete: replaces completion
//!                                 └─ on_error:    original kept as suppressed companion
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types                                    |
//! |-------------------|-------------------------------------------------------------|----------------------------------------------|
//! | **Protocol**      | Reactive-streams roles with a synchronous fatal channel.    | [`Publisher`], [`Subscriber`], [`Subscription`] |
//! | **Operator**      | Publisher decorator with optional hooks and seeded state.   | [`StatefulPeek`], [`StatefulPeekBuilder`]    |
//! | **State machine** | Hook invocation, terminal-signal discipline.                | [`PeekStatefulSubscriber`], [`Phase`]        |
//! | **Errors**        | Fatal vs recoverable classification, suppressed companions. | [`HookError`], [`StreamError`], [`Fatal`]    |
//! | **Introspection** | Parent / actual / terminated queries, cross-thread probe.   | [`Attr`], [`Scanned`], [`Probe`]             |
//! | **Logging**       | `tracing` events on drops and failures; logging peek.       | [`logged`]                                   |
//! | **Configuration** | Operator name and dropped-error routing.                    | [`Config`]                                   |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use stateful_peek::{HookError, Publisher, Signal, StatefulPeek, StreamError, Subscriber, Subscription};
//!
//! // A source that fails right away.
//! struct Broken;
//! impl Publisher<i32> for Broken {
//!     fn subscribe(&self, mut s: Box<dyn Subscriber<i32>>) -> Signal {
//!         s.on_subscribe(Arc::new(stateful_peek::EmptySubscription))?;
//!         s.on_error(StreamError::msg("bar"))
//!     }
//! }
//!
//! // A consumer that prints what it gets.
//! struct Print;
//! impl Subscriber<i32> for Print {
//!     fn on_subscribe(&mut self, s: Arc<dyn Subscription>) -> Signal { s.request(u64::MAX); Ok(()) }
//!     fn on_next(&mut self, item: i32) -> Signal { println!("{item}"); Ok(()) }
//!     fn on_error(&mut self, e: StreamError) -> Signal {
//!         assert_eq!(e.message(), "test");
//!         assert_eq!(e.suppressed().map(StreamError::message).as_deref(), Some("bar"));
//!         Ok(())
//!     }
//!     fn on_complete(&mut self) -> Signal { Ok(()) }
//! }
//!
//! let peek = StatefulPeek::<i32, u32>::builder()
//!     .source(Arc::new(Broken))
//!     .seed(|| Ok(0))
//!     .on_error(|_, _| Err(HookError::msg("test")))
//!     .build()?;
//! peek.subscribe(Box::new(Print))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod config;
mod error;
mod peek;
mod reactive;
mod scan;

#[cfg(test)]
mod testing;

// ---- Public re-exports ----

pub use config::{Config, DroppedErrorFn};
pub use error::{
    bubble, classify, normalize, propagate, unwrap, BuildError, Cause, Fatal, HookError, Message,
    Severity, StreamError,
};
pub use peek::{
    hooks, logged, Hooks, PeekStatefulSubscriber, StatefulPeek, StatefulPeekBuilder,
};
pub use reactive::{EmptySubscription, Publisher, Signal, Subscriber, Subscription};
pub use scan::{Attr, Phase, Probe, Scanned};
