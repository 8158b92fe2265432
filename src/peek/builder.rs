use std::borrow::Cow;
use std::sync::Arc;

use crate::{
    config::Config,
    error::{BuildError, HookError, StreamError},
    reactive::Publisher,
};

use super::{hooks::Hooks, operator::StatefulPeek};

/// Builder for [`StatefulPeek`] with optional hooks.
///
/// Nothing is validated until [`build`](Self::build).
pub struct StatefulPeekBuilder<T, S> {
    source: Option<Arc<dyn Publisher<T>>>,
    hooks: Hooks<T, S>,
    config: Config,
}

impl<T, S> StatefulPeekBuilder<T, S> {
    /// Creates an empty builder with default configuration.
    pub fn new() -> Self {
        Self {
            source: None,
            hooks: Hooks::default(),
            config: Config::default(),
        }
    }

    /// Sets the upstream publisher.
    pub fn source(mut self, source: Arc<dyn Publisher<T>>) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the per-subscription state factory.
    pub fn seed<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<S, HookError> + Send + Sync + 'static,
    {
        self.hooks.seed = Some(Box::new(f));
        self
    }

    /// Sets the hook run before each element is forwarded.
    pub fn on_next<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, Option<&mut S>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.on_next = Some(Box::new(f));
        self
    }

    /// Sets the hook run before the upstream error is forwarded.
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&StreamError, Option<&mut S>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.on_error = Some(Box::new(f));
        self
    }

    /// Sets the hook run before completion is forwarded.
    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&mut S>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.on_complete = Some(Box::new(f));
        self
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the operator name.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Builds the operator.
    ///
    /// # Errors
    /// [`BuildError::MissingSource`] if no source was set.
    pub fn build(self) -> Result<StatefulPeek<T, S>, BuildError> {
        let source = self.source.ok_or(BuildError::MissingSource)?;
        Ok(StatefulPeek::from_parts(source, self.hooks, self.config))
    }
}

impl<T, S> Default for StatefulPeekBuilder<T, S> {
    fn default() -> Self {
        Self::new()
    }
}
