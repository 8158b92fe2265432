//! # Introspection for tracing tools.
//!
//! A [`PeekStatefulSubscriber`](crate::PeekStatefulSubscriber) answers a small,
//! closed set of attribute queries ([`Attr`]). Every query is read-only.
//!
//! [`Probe`] is a cloneable, thread-safe view of the same data that can be
//! read while another thread is delivering signals:
//! ```text
//! PeekStatefulSubscriber ──owns──► Arc<Link> ◄──shares── Probe (any thread)
//!                                     │
//!                                     ├─ parent   (set once in on_subscribe)
//!                                     ├─ phase    (atomic: Init → Active → Terminated)
//!                                     └─ name
//! ```

use std::borrow::Cow;
use std::sync::atomic::{AtomicU8, Ordering as AtomicOrdering};
use std::sync::{Arc, OnceLock};

use crate::reactive::{Subscriber, Subscription};

/// Attribute keys understood by [`PeekStatefulSubscriber::scan`](crate::PeekStatefulSubscriber::scan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    /// Upstream subscription.
    Parent,
    /// Downstream consumer.
    Actual,
    /// Whether a terminal signal was forwarded (or a fatal error escaped).
    Terminated,
    /// Operator name.
    Name,
}

/// Answer to one [`Attr`] query.
pub enum Scanned<'a, T> {
    /// `None` before `on_subscribe`.
    Parent(Option<&'a Arc<dyn Subscription>>),
    /// Downstream consumer.
    Actual(&'a dyn Subscriber<T>),
    /// `true` once a terminal signal was processed.
    Terminated(bool),
    /// Operator name from the configuration.
    Name(&'a str),
}

impl<T> Scanned<'_, T> {
    /// Returns the terminated flag if this answers [`Attr::Terminated`].
    pub fn as_terminated(&self) -> Option<bool> {
        match self {
            Scanned::Terminated(done) => Some(*done),
            _ => None,
        }
    }
}

/// Lifecycle of one peek subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    /// Constructed, `on_subscribe` not yet received.
    Init = 0,
    /// Subscribed and seeded.
    Active = 1,
    /// Terminal signal forwarded or fatal error escaped. Absorbing.
    Terminated = 2,
}

impl Phase {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Phase::Init,
            1 => Phase::Active,
            _ => Phase::Terminated,
        }
    }
}

/// State shared between a subscriber, its downstream handle and probes.
///
/// Doubles as the [`Subscription`] handed downstream: `request`/`cancel`
/// pass straight through to the parent.
pub(crate) struct Link {
    parent: OnceLock<Arc<dyn Subscription>>,
    phase: AtomicU8,
    name: Cow<'static, str>,
}

impl Link {
    pub(crate) fn new(name: Cow<'static, str>) -> Self {
        Self {
            parent: OnceLock::new(),
            phase: AtomicU8::new(Phase::Init as u8),
            name,
        }
    }

    /// Stores the parent; returns `false` if one was already set.
    pub(crate) fn set_parent(&self, parent: Arc<dyn Subscription>) -> bool {
        self.parent.set(parent).is_ok()
    }

    pub(crate) fn parent(&self) -> Option<&Arc<dyn Subscription>> {
        self.parent.get()
    }

    pub(crate) fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(AtomicOrdering::Acquire))
    }

    pub(crate) fn set_phase(&self, phase: Phase) {
        self.phase.store(phase as u8, AtomicOrdering::Release);
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.phase() == Phase::Terminated
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn cancel_parent(&self) {
        if let Some(parent) = self.parent.get() {
            parent.cancel();
        }
    }
}

impl Subscription for Link {
    fn request(&self, n: u64) {
        if let Some(parent) = self.parent.get() {
            parent.request(n);
        }
    }

    fn cancel(&self) {
        self.cancel_parent();
    }
}

/// Thread-safe, read-only view of one peek subscription.
#[derive(Clone)]
pub struct Probe {
    link: Arc<Link>,
}

impl Probe {
    pub(crate) fn new(link: Arc<Link>) -> Self {
        Self { link }
    }

    /// Upstream subscription, once `on_subscribe` has been received.
    pub fn parent(&self) -> Option<Arc<dyn Subscription>> {
        self.link.parent().cloned()
    }

    /// Whether the subscription has terminated.
    pub fn terminated(&self) -> bool {
        self.link.is_terminated()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.link.phase()
    }

    /// Operator name.
    pub fn name(&self) -> &str {
        self.link.name()
    }
}

impl std::fmt::Debug for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Probe")
            .field("name", &self.name())
            .field("phase", &self.phase())
            .field("subscribed", &self.link.parent().is_some())
            .finish()
    }
}
