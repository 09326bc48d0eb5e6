//! Per-request execution context handed to lookup collaborators.
//!
//! A [`LookupContext`] lives for exactly one adapter invocation. It carries
//! the identifier in both raw and parsed form, the request trace identifier,
//! a cancellation signal tied to the request lifetime, and an optional
//! deadline. Collaborators that block should consult it; the adapter only
//! forwards these signals and never enforces them.

use std::time::{Duration, Instant};

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use crate::domain::ports::LookupError;

/// Request-local execution context for an identifier lookup.
///
/// # Examples
/// ```
/// use markbook::domain::LookupContext;
///
/// let ctx = LookupContext::new("42", 42);
/// assert_eq!(ctx.id(), 42);
/// assert!(!ctx.is_cancelled());
/// assert!(ctx.check().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LookupContext {
    raw_id: String,
    id: i64,
    trace_id: Option<String>,
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl LookupContext {
    /// Build a context with no trace identifier, no deadline and a fresh
    /// cancellation token.
    pub fn new(raw_id: impl Into<String>, id: i64) -> Self {
        Self {
            raw_id: raw_id.into(),
            id,
            trace_id: None,
            cancellation: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Attach the trace identifier of the inbound request.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Replace the cancellation token with one owned by the caller.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Set an absolute deadline for the lookup.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Parsed identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Identifier exactly as it appeared in the request path.
    pub fn raw_id(&self) -> &str {
        self.raw_id.as_str()
    }

    /// Trace identifier of the originating request, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Absolute deadline, if one was configured.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline. Saturates at zero once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Whether the request has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Future that resolves once the request is cancelled.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancellation.cancelled()
    }

    /// Report whether the lookup may still proceed.
    ///
    /// # Errors
    /// Returns [`LookupError::Cancelled`] once the request is cancelled and
    /// [`LookupError::DeadlineExceeded`] once the deadline has passed.
    pub fn check(&self) -> Result<(), LookupError> {
        if self.is_cancelled() {
            return Err(LookupError::cancelled());
        }
        match self.remaining() {
            Some(left) if left.is_zero() => Err(LookupError::deadline_exceeded()),
            _ => Ok(()),
        }
    }
}
