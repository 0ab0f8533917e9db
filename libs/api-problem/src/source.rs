//! Input contract for errors fed into the problem builder.

use std::error::Error as StdError;

use crate::builder::DEFAULT_MAX_CHAIN_DEPTH;

/// Capability view over a runtime error: a message, a raw numeric code, an
/// opaque trace text and an optional causing error.
///
/// The trait is object safe so any error representation can be adapted with
/// a small wrapper. `cause` links form a singly-linked chain; the chain is
/// expected to be finite and acyclic, and the builder bounds its traversal
/// to defend against misbehaving implementations.
pub trait ErrorSource {
    /// Human-readable error message.
    fn message(&self) -> &str;

    /// Raw application code. Any value, including 0 and negatives; only the
    /// builder's status derivation interprets it as a potential HTTP status.
    fn code(&self) -> i64;

    /// Backtrace text, opaque to this crate.
    fn trace(&self) -> &str;

    /// The direct causing error, if any.
    fn cause(&self) -> Option<&dyn ErrorSource>;
}

/// Owned error carrier implementing [`ErrorSource`].
///
/// The default adapter for callers that do not have a richer error type of
/// their own, and the construction surface used throughout this crate's
/// tests.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct CapturedError {
    message: String,
    code: i64,
    trace: String,
    cause: Option<Box<CapturedError>>,
}

impl CapturedError {
    /// Create an error with the given message and code, no trace, no cause.
    pub fn new(message: impl Into<String>, code: i64) -> Self {
        Self {
            message: message.into(),
            code,
            trace: String::new(),
            cause: None,
        }
    }

    /// Attach trace text.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = trace.into();
        self
    }

    /// Attach the direct causing error, replacing any previous one.
    pub fn caused_by(mut self, cause: CapturedError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Capture a [`std::error::Error`] and its `source()` chain.
    ///
    /// Standard errors carry no numeric code or trace text, so `code` is 0
    /// and `trace` is empty on every captured entry. The walk is truncated
    /// at [`DEFAULT_MAX_CHAIN_DEPTH`] entries to stay bounded on malformed
    /// source chains.
    pub fn from_std(error: &(dyn StdError + 'static)) -> Self {
        let mut messages = Vec::new();
        let mut current = Some(error);
        while let Some(err) = current {
            if messages.len() == DEFAULT_MAX_CHAIN_DEPTH {
                break;
            }
            messages.push(err.to_string());
            current = err.source();
        }

        let mut captured: Option<CapturedError> = None;
        for message in messages.into_iter().rev() {
            let mut entry = CapturedError::new(message, 0);
            if let Some(cause) = captured.take() {
                entry.cause = Some(Box::new(cause));
            }
            captured = Some(entry);
        }
        // `messages` always holds at least the root error itself.
        captured.unwrap_or_else(|| CapturedError::new(String::new(), 0))
    }
}

impl ErrorSource for CapturedError {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> i64 {
        self.code
    }

    fn trace(&self) -> &str {
        &self.trace
    }

    fn cause(&self) -> Option<&dyn ErrorSource> {
        self.cause.as_deref().map(|c| c as &dyn ErrorSource)
    }
}
