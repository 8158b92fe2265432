//! Error types and the fatal/recoverable classifier.
//!
//! This module defines the error values that travel through a peek pipeline:
//!
//! - [`StreamError`] - a normalized error delivered downstream through `on_error`.
//! - [`Fatal`] - a "bubbling" error that must escape synchronously from the signal call.
//! - [`HookError`] - what a user hook returns when it fails, tagged by [`Severity`].
//! - [`BuildError`] - construction failures of the operator itself.
//!
//! ## Classification
//! ```text
//! hook returns Err(HookError)
//!        │
//!        ├─ Fatal(..)            ──► classify = Fatal       ──► Err(Fatal) from the signal call
//!        ├─ Recoverable(Fatal)   ──► classify = Fatal       ──► Err(Fatal) from the signal call
//!        └─ Recoverable(cause)   ──► classify = Recoverable ──► normalize ──► on_error(StreamError)
//! ```
//!
//! ## Rules
//! - [`normalize`] wraps a cause at most once; a cause that already is a [`StreamError`] is returned as is.
//! - [`unwrap`] peels every [`StreamError`] / [`Fatal`] layer and returns the original cause (same `Arc`).

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Shared, type-erased error cause.
///
/// `Arc` keeps identity stable across wrapping, so callers can compare causes with [`Arc::ptr_eq`].
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Plain message error, used by [`StreamError::msg`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Message(pub String);

/// How a hook failure must propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Must escape synchronously from the triggering call, never turned into a stream signal.
    Fatal,
    /// Normalized into exactly one downstream `on_error`.
    Recoverable,
}

/// # Error delivered downstream through `on_error`.
///
/// Displays as the message of its cause. When a hook fails while handling an
/// upstream error, the original error is kept as a [`suppressed`](StreamError::suppressed)
/// companion instead of being dropped.
#[derive(Debug, Clone)]
pub struct StreamError {
    cause: Cause,
    suppressed: Option<Box<StreamError>>,
}

impl StreamError {
    /// Wraps an error value.
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        normalize(Arc::new(err))
    }

    /// Builds an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    /// Returns the wrapped cause.
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Returns the innermost original cause.
    pub fn unwrap(&self) -> Cause {
        unwrap(&self.cause)
    }

    /// Returns the cause message.
    pub fn message(&self) -> String {
        self.cause.to_string()
    }

    /// Returns the attached companion error, if any.
    pub fn suppressed(&self) -> Option<&StreamError> {
        self.suppressed.as_deref()
    }

    /// Attaches `other` as a suppressed companion of this error.
    ///
    /// Companions form a chain: `other` goes after any already attached one.
    /// An error sharing its cause with this error or with a chained companion
    /// is not attached again.
    #[must_use]
    pub fn with_suppressed(mut self, other: StreamError) -> Self {
        if !Arc::ptr_eq(&self.cause, &other.cause) {
            attach(&mut self.suppressed, other);
        }
        self
    }

    /// Returns `true` if the innermost cause has type `E`.
    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.unwrap().is::<E>()
    }

    /// Returns a short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self.suppressed {
            Some(_) => "stream_error_with_suppressed",
            None => "stream_error",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl StdError for StreamError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// # Error that must bubble up the call stack.
///
/// Returned as `Err` from signal methods; never delivered through `on_error`.
#[derive(Error, Debug, Clone)]
#[error("fatal: {cause}")]
pub struct Fatal {
    cause: Cause,
}

impl Fatal {
    /// Marks `cause` as fatal.
    pub fn new(cause: Cause) -> Self {
        Self { cause }
    }

    /// Returns the wrapped cause.
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Returns the innermost original cause.
    pub fn unwrap(&self) -> Cause {
        unwrap(&self.cause)
    }
}

/// # Failure returned by a user hook.
#[derive(Error, Debug, Clone)]
pub enum HookError {
    /// Explicitly marked as fatal via [`bubble`].
    #[error(transparent)]
    Fatal(#[from] Fatal),

    /// Any other failure.
    #[error("{0}")]
    Recoverable(Cause),
}

impl HookError {
    /// Wraps `err` as a recoverable hook failure.
    pub fn recoverable<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        HookError::Recoverable(Arc::new(err))
    }

    /// Wraps `err` as a fatal hook failure.
    pub fn fatal<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        bubble(Arc::new(err))
    }

    /// Recoverable failure carrying a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::recoverable(Message(message.into()))
    }

    /// Returns the severity of this failure.
    pub fn severity(&self) -> Severity {
        classify(self)
    }

    /// Returns a short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self.severity() {
            Severity::Fatal => "hook_fatal",
            Severity::Recoverable => "hook_failed",
        }
    }

    /// Routes the failure: `Ok` with the normalized downstream error, or `Err` with the escaping fatal.
    pub fn into_signal(self) -> Result<StreamError, Fatal> {
        match self {
            HookError::Fatal(fatal) => Err(fatal),
            HookError::Recoverable(cause) => match cause.downcast_ref::<Fatal>() {
                Some(fatal) => Err(fatal.clone()),
                None => Ok(normalize(cause)),
            },
        }
    }
}

impl From<StreamError> for HookError {
    fn from(err: StreamError) -> Self {
        HookError::Recoverable(Arc::new(err))
    }
}

/// # Errors produced while building the operator.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// No source publisher was supplied.
    #[error("source publisher is required")]
    MissingSource,
}

impl BuildError {
    /// Returns a short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            BuildError::MissingSource => "build_missing_source",
        }
    }
}

/// Marks `cause` as fatal; the returned error escapes synchronously.
pub fn bubble(cause: Cause) -> HookError {
    HookError::Fatal(Fatal::new(cause))
}

/// Marks `cause` as recoverable; the returned error becomes a terminal `on_error`.
pub fn propagate(cause: Cause) -> HookError {
    HookError::Recoverable(cause)
}

/// Classifies a hook failure.
///
/// A recoverable failure whose cause is itself a [`Fatal`] is still fatal.
pub fn classify(err: &HookError) -> Severity {
    match err {
        HookError::Fatal(_) => Severity::Fatal,
        HookError::Recoverable(cause) if cause.is::<Fatal>() => Severity::Fatal,
        HookError::Recoverable(_) => Severity::Recoverable,
    }
}

/// Wraps `cause` for downstream delivery, exactly once.
pub fn normalize(cause: Cause) -> StreamError {
    match cause.downcast_ref::<StreamError>() {
        Some(existing) => existing.clone(),
        None => StreamError {
            cause,
            suppressed: None,
        },
    }
}

fn attach(slot: &mut Option<Box<StreamError>>, other: StreamError) {
    match slot {
        Some(next) if Arc::ptr_eq(&next.cause, &other.cause) => {}
        Some(next) => attach(&mut next.suppressed, other),
        None => *slot = Some(Box::new(other)),
    }
}

/// Returns the original cause beneath any [`StreamError`] or [`Fatal`] layers.
pub fn unwrap(cause: &Cause) -> Cause {
    if let Some(stream) = cause.downcast_ref::<StreamError>() {
        return unwrap(&stream.cause);
    }
    if let Some(fatal) = cause.downcast_ref::<Fatal>() {
        return unwrap(&fatal.cause);
    }
    Arc::clone(cause)
}
