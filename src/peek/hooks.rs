//! # Hook set observed by a stateful peek.
//!
//! Four independently optional callables. An absent hook means pure
//! passthrough for that signal. Hooks receive the per-subscription state as
//! `Option<&mut S>`: `None` when no seed is configured.

use crate::error::{HookError, StreamError};

/// Creates the per-subscription state.
pub type SeedFn<S> = Box<dyn Fn() -> Result<S, HookError> + Send + Sync>;

/// Observes one element.
pub type NextFn<T, S> = Box<dyn Fn(&T, Option<&mut S>) -> Result<(), HookError> + Send + Sync>;

/// Observes the upstream error.
pub type ErrorFn<S> =
    Box<dyn Fn(&StreamError, Option<&mut S>) -> Result<(), HookError> + Send + Sync>;

/// Observes the upstream completion.
pub type CompleteFn<S> = Box<dyn Fn(Option<&mut S>) -> Result<(), HookError> + Send + Sync>;

/// The hooks shared by every subscription of one operator.
pub struct Hooks<T, S> {
    pub(crate) seed: Option<SeedFn<S>>,
    pub(crate) on_next: Option<NextFn<T, S>>,
    pub(crate) on_error: Option<ErrorFn<S>>,
    pub(crate) on_complete: Option<CompleteFn<S>>,
}

impl<T, S> Hooks<T, S> {
    /// Bundles the given hooks.
    pub fn new(
        seed: Option<SeedFn<S>>,
        on_next: Option<NextFn<T, S>>,
        on_error: Option<ErrorFn<S>>,
        on_complete: Option<CompleteFn<S>>,
    ) -> Self {
        Self {
            seed,
            on_next,
            on_error,
            on_complete,
        }
    }

    /// True if no hook is present (the operator is a pure passthrough).
    pub fn is_empty(&self) -> bool {
        self.seed.is_none()
            && self.on_next.is_none()
            && self.on_error.is_none()
            && self.on_complete.is_none()
    }

    pub(crate) fn seed(&self) -> Result<Option<S>, HookError> {
        match &self.seed {
            Some(f) => f().map(Some),
            None => Ok(None),
        }
    }
}

impl<T, S> Default for Hooks<T, S> {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}

impl<T, S> std::fmt::Debug for Hooks<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("seed", &self.seed.is_some())
            .field("on_next", &self.on_next.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Boxes a seed factory for [`StatefulPeek::new`](crate::StatefulPeek::new).
pub fn seed<S, F>(f: F) -> Option<SeedFn<S>>
where
    F: Fn() -> Result<S, HookError> + Send + Sync + 'static,
{
    Some(Box::new(f))
}

/// Boxes a next-hook for [`StatefulPeek::new`](crate::StatefulPeek::new).
pub fn on_next<T, S, F>(f: F) -> Option<NextFn<T, S>>
where
    F: Fn(&T, Option<&mut S>) -> Result<(), HookError> + Send + Sync + 'static,
{
    Some(Box::new(f))
}

/// Boxes an error-hook for [`StatefulPeek::new`](crate::StatefulPeek::new).
pub fn on_error<S, F>(f: F) -> Option<ErrorFn<S>>
where
    F: Fn(&StreamError, Option<&mut S>) -> Result<(), HookError> + Send + Sync + 'static,
{
    Some(Box::new(f))
}

/// Boxes a complete-hook for [`StatefulPeek::new`](crate::StatefulPeek::new).
pub fn on_complete<S, F>(f: F) -> Option<CompleteFn<S>>
where
    F: Fn(Option<&mut S>) -> Result<(), HookError> + Send + Sync + 'static,
{
    Some(Box::new(f))
}
