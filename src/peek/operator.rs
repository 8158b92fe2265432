//! # StatefulPeek: the publisher decorator.
//!
//! Wraps a source [`Publisher`] so every subscription gets its own
//! [`PeekStatefulSubscriber`] and its own lazily seeded state.
//!
//! ```text
//! consumer ──► StatefulPeek::subscribe ──► PeekStatefulSubscriber(consumer)
//!                                                   │
//!                                   source.subscribe(peek subscriber)
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use stateful_peek::{Publisher, Signal, StatefulPeek, Subscriber};
//!
//! struct Nothing;
//! impl Publisher<u32> for Nothing {
//!     fn subscribe(&self, _subscriber: Box<dyn Subscriber<u32>>) -> Signal {
//!         Ok(())
//!     }
//! }
//!
//! let seeds = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seeds);
//! let peek = StatefulPeek::<u32, usize>::builder()
//!     .source(Arc::new(Nothing))
//!     .seed(move || {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!         Ok(0)
//!     })
//!     .on_next(|_, seen| {
//!         if let Some(seen) = seen {
//!             *seen += 1;
//!         }
//!         Ok(())
//!     })
//!     .build()
//!     .expect("source is set");
//! assert_eq!(peek.name(), "peek_stateful");
//! ```

use std::sync::Arc;

use crate::{
    config::Config,
    error::BuildError,
    reactive::{Publisher, Signal, Subscriber},
};

use super::{
    builder::StatefulPeekBuilder,
    hooks::{CompleteFn, ErrorFn, Hooks, NextFn, SeedFn},
    subscriber::PeekStatefulSubscriber,
};

/// Publisher that peeks at every signal of its source with per-subscription state.
pub struct StatefulPeek<T, S> {
    source: Arc<dyn Publisher<T>>,
    hooks: Arc<Hooks<T, S>>,
    config: Config,
}

impl<T, S> StatefulPeek<T, S> {
    /// Creates the operator from positional, individually optional parts.
    ///
    /// Only `source` is required; each absent hook means passthrough for its signal.
    ///
    /// # Errors
    /// [`BuildError::MissingSource`] if `source` is `None`, whatever hooks are given.
    pub fn new(
        source: Option<Arc<dyn Publisher<T>>>,
        seed: Option<SeedFn<S>>,
        on_next: Option<NextFn<T, S>>,
        on_error: Option<ErrorFn<S>>,
        on_complete: Option<CompleteFn<S>>,
    ) -> Result<Self, BuildError> {
        let source = source.ok_or(BuildError::MissingSource)?;
        Ok(Self::from_parts(
            source,
            Hooks::new(seed, on_next, on_error, on_complete),
            Config::default(),
        ))
    }

    /// Starts a builder.
    pub fn builder() -> StatefulPeekBuilder<T, S> {
        StatefulPeekBuilder::new()
    }

    pub(crate) fn from_parts(
        source: Arc<dyn Publisher<T>>,
        hooks: Hooks<T, S>,
        config: Config,
    ) -> Self {
        Self {
            source,
            hooks: Arc::new(hooks),
            config,
        }
    }

    /// Returns the operator name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the wrapped source.
    pub fn source(&self) -> &Arc<dyn Publisher<T>> {
        &self.source
    }
}

impl<T, S> Publisher<T> for StatefulPeek<T, S>
where
    T: Send + 'static,
    S: Send + 'static,
{
    fn subscribe(&self, subscriber: Box<dyn Subscriber<T>>) -> Signal {
        let peek =
            PeekStatefulSubscriber::new(subscriber, Arc::clone(&self.hooks), self.config.clone());
        self.source.subscribe(Box::new(peek))
    }
}
