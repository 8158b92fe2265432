//! # Operator configuration.
//!
//! Provides [`Config`] settings shared by every subscription of one
//! [`StatefulPeek`](crate::StatefulPeek).
//!
//! Config is used in two ways:
//! 1. **Operator creation**: `StatefulPeek::builder().with_config(config)`
//! 2. **Per-subscription**: each `PeekStatefulSubscriber` clones the name and the dropped-error callback
//!
//! ## Defaults
//! - `name = "peek_stateful"`
//! - `on_error_dropped = None` → dropped errors are only logged

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::StreamError;

/// Callback receiving errors that arrive after the subscriber has terminated.
pub type DroppedErrorFn = Arc<dyn Fn(&StreamError) + Send + Sync>;

/// Configuration for a stateful peek operator.
///
/// ## Field semantics
/// - `name`: operator name in log fields and in [`Attr::Name`](crate::Attr::Name)
/// - `on_error_dropped`: receives errors delivered before `on_subscribe` or after termination
#[derive(Clone)]
pub struct Config {
    /// Operator name used by tracing and introspection.
    pub name: Cow<'static, str>,

    /// Receives errors that can no longer be forwarded downstream.
    ///
    /// A terminated subscriber never forwards a second terminal signal; an
    /// upstream error arriving afterwards is handed here (and logged).
    pub on_error_dropped: Option<DroppedErrorFn>,
}

impl Config {
    /// Returns a copy with a different operator name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns a copy with a dropped-error callback.
    #[must_use]
    pub fn with_on_error_dropped(
        mut self,
        f: impl Fn(&StreamError) + Send + Sync + 'static,
    ) -> Self {
        self.on_error_dropped = Some(Arc::new(f));
        self
    }

    /// Routes an error that arrived outside the active phase.
    pub(crate) fn error_dropped(&self, err: &StreamError) {
        tracing::warn!(operator = %self.name, error = %err, "error dropped outside active phase");
        if let Some(f) = &self.on_error_dropped {
            f(err);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("peek_stateful"),
            on_error_dropped: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("name", &self.name)
            .field("on_error_dropped", &self.on_error_dropped.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_default_name() {
        let cfg = Config::default();
        assert_eq!(cfg.name, "peek_stateful");
        assert!(cfg.on_error_dropped.is_none());
    }

    #[test]
    fn test_error_dropped_invokes_callback() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let cfg = Config::default()
            .with_name("audit")
            .with_on_error_dropped(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        cfg.error_dropped(&StreamError::msg("late"));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(cfg.name, "audit");
        assert!(format!("{cfg:?}").contains("on_error_dropped: true"));
    }
}
