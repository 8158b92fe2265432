//! # PeekStatefulSubscriber: the signal-interception state machine.
//!
//! Sits between an upstream publisher and the downstream consumer, invoking
//! hooks on each signal and owning the per-subscription state.
//!
//! ## State machine
//! ```text
//!   Init ──on_subscribe──► Active ──on_complete / on_error──► Terminated
//!    │                       │
//!    │ seed fails            │ on_next hook fails (recoverable)
//!    └────────► Terminated ◄─┘
//! ```
//!
//! ## Hook failure routing
//! | signal         | recoverable hook failure                         | fatal hook failure     |
//! |----------------|--------------------------------------------------|------------------------|
//! | `on_subscribe` | empty subscription + `on_error(wrapped)`         | `Err(Fatal)` returned  |
//! | `on_next`      | cancel upstream, `on_error(wrapped)`, drop item  | `Err(Fatal)` returned  |
//! | `on_complete`  | `on_error(wrapped)` instead of `on_complete`     | `Err(Fatal)` returned  |
//! | `on_error`     | `on_error(new)` with original as suppressed      | `Err(Fatal)` returned  |
//!
//! ## Rules
//! - The seed runs at most once, during `on_subscribe`.
//! - At most one terminal signal is forwarded downstream.
//! - Only `Active` forwards: `on_next` / `on_error` / `on_complete` arriving
//!   in `Init` or `Terminated` are dropped (and logged), errors go to the
//!   dropped-error callback.
//! - A fatal error also moves the subscriber to `Terminated`.
//! - `request` / `cancel` from downstream pass straight through to the parent.

use std::sync::Arc;

use crate::{
    config::Config,
    error::{Fatal, HookError, StreamError},
    reactive::{EmptySubscription, Signal, Subscriber, Subscription},
    scan::{Attr, Link, Phase, Probe, Scanned},
};

use super::hooks::Hooks;

/// Subscriber/subscription decorator created for each downstream subscription.
pub struct PeekStatefulSubscriber<T, S> {
    actual: Box<dyn Subscriber<T>>,
    hooks: Arc<Hooks<T, S>>,
    config: Config,
    state: Option<S>,
    link: Arc<Link>,
}

impl<T, S> PeekStatefulSubscriber<T, S> {
    /// Wraps `actual` with the given hooks.
    pub fn new(actual: Box<dyn Subscriber<T>>, hooks: Arc<Hooks<T, S>>, config: Config) -> Self {
        let link = Arc::new(Link::new(config.name.clone()));
        Self {
            actual,
            hooks,
            config,
            state: None,
            link,
        }
    }

    /// Upstream subscription; `None` before `on_subscribe`.
    pub fn parent(&self) -> Option<&Arc<dyn Subscription>> {
        self.link.parent()
    }

    /// Downstream consumer.
    pub fn actual(&self) -> &dyn Subscriber<T> {
        self.actual.as_ref()
    }

    /// Whether a terminal signal has been processed.
    pub fn terminated(&self) -> bool {
        self.link.is_terminated()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.link.phase()
    }

    /// Per-subscription state, once seeded.
    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    /// Answers one introspection query.
    pub fn scan(&self, attr: Attr) -> Scanned<'_, T> {
        match attr {
            Attr::Parent => Scanned::Parent(self.parent()),
            Attr::Actual => Scanned::Actual(self.actual()),
            Attr::Terminated => Scanned::Terminated(self.terminated()),
            Attr::Name => Scanned::Name(self.link.name()),
        }
    }

    /// Returns a thread-safe view for observers on other threads.
    pub fn probe(&self) -> Probe {
        Probe::new(Arc::clone(&self.link))
    }

    fn terminate(&self) {
        self.link.set_phase(Phase::Terminated);
    }

    /// Marks the subscriber terminated and hands the fatal error back to the caller.
    fn escape(&self, fatal: Fatal, signal: &'static str) -> Signal {
        self.terminate();
        tracing::warn!(operator = %self.config.name, signal, error = %fatal, "fatal hook error escaping");
        Err(fatal)
    }

    fn is_active(&self) -> bool {
        self.link.phase() == Phase::Active
    }

    fn dropped(&self, signal: &'static str) {
        tracing::debug!(operator = %self.config.name, signal, phase = ?self.link.phase(), "signal dropped outside active phase");
    }
}

impl<T, S> Subscriber<T> for PeekStatefulSubscriber<T, S>
where
    T: Send,
    S: Send,
{
    fn on_subscribe(&mut self, subscription: Arc<dyn Subscription>) -> Signal {
        if self.link.phase() != Phase::Init || !self.link.set_parent(Arc::clone(&subscription)) {
            tracing::debug!(operator = %self.config.name, "duplicate on_subscribe; cancelling new subscription");
            subscription.cancel();
            return Ok(());
        }

        match self.hooks.seed() {
            Ok(state) => self.state = state,
            Err(err) => {
                return match err.into_signal() {
                    Err(fatal) => self.escape(fatal, "on_subscribe"),
                    Ok(err) => {
                        self.terminate();
                        tracing::debug!(operator = %self.config.name, error = %err, "seed failed");
                        self.actual.on_subscribe(Arc::new(EmptySubscription))?;
                        self.actual.on_error(err)
                    }
                };
            }
        }

        self.link.set_phase(Phase::Active);
        let downstream: Arc<dyn Subscription> = self.link.clone();
        self.actual.on_subscribe(downstream)
    }

    fn on_next(&mut self, item: T) -> Signal {
        if !self.is_active() {
            self.dropped("on_next");
            return Ok(());
        }

        if let Some(hook) = &self.hooks.on_next {
            if let Err(err) = hook(&item, self.state.as_mut()) {
                return match err.into_signal() {
                    Err(fatal) => self.escape(fatal, "on_next"),
                    Ok(err) => {
                        self.terminate();
                        tracing::debug!(operator = %self.config.name, error = %err, "next hook failed; cancelling upstream");
                        self.link.cancel_parent();
                        self.actual.on_error(err)
                    }
                };
            }
        }

        self.actual.on_next(item)
    }

    fn on_error(&mut self, error: StreamError) -> Signal {
        if !self.is_active() {
            self.config.error_dropped(&error);
            return Ok(());
        }

        let outcome = match &self.hooks.on_error {
            Some(hook) => hook(&error, self.state.as_mut()),
            None => Ok(()),
        };
        self.terminate();

        match outcome {
            Ok(()) => self.actual.on_error(error),
            Err(err) => match err.into_signal() {
                Err(fatal) => self.escape(fatal, "on_error"),
                Ok(err) => {
                    tracing::debug!(operator = %self.config.name, error = %err, original = %error, "error hook failed");
                    self.actual.on_error(err.with_suppressed(error))
                }
            },
        }
    }

    fn on_complete(&mut self) -> Signal {
        if !self.is_active() {
            self.dropped("on_complete");
            return Ok(());
        }

        let outcome = match &self.hooks.on_complete {
            Some(hook) => hook(self.state.as_mut()),
            None => Ok(()),
        };
        self.terminate();

        match outcome.map_err(HookError::into_signal) {
            Ok(()) => self.actual.on_complete(),
            Err(Err(fatal)) => self.escape(fatal, "on_complete"),
            Err(Ok(err)) => {
                tracing::debug!(operator = %self.config.name, error = %err, "complete hook failed");
                self.actual.on_error(err)
            }
        }
    }
}
