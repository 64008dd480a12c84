//! Unified adapter error types.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Message used when the transport returns neither an error nor a payload.
pub const EMPTY_RESPONSE: &str = "Empty response";

/// Result alias used across the adapter.
pub type TraderResult<T> = Result<T, TraderError>;

// ─── TransportError ──────────────────────────────────────────────────────────

/// Failure reported by a single transport attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    /// Order id recovered out-of-band after the attempt failed, e.g. a placement
    /// that timed out although the exchange created the order.
    pub recovered_order_id: Option<String>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recovered_order_id: None,
        }
    }

    pub fn empty_response() -> Self {
        Self::new(EMPTY_RESPONSE)
    }

    /// Attach an order id that was recovered despite the failure.
    pub fn with_recovered_order(mut self, order_id: impl Into<String>) -> Self {
        self.recovered_order_id = Some(order_id.into());
        self
    }

    pub fn is_empty_response(&self) -> bool {
        self.message == EMPTY_RESPONSE
    }
}

// ─── ErrorKind ───────────────────────────────────────────────────────────────

/// What a failure means for the caller and for the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport returned neither error nor payload.
    EmptyResponse,
    /// Retryable after a fixed backoff.
    RateLimited,
    /// Retryable without backoff.
    TransientTransport,
    /// Gateway error on a call that cannot change state; retryable.
    AmbiguousReadFailure,
    /// A payload arrived but could not be mapped.
    MalformedResponse,
    /// Operation declared but not provided by this exchange.
    Unimplemented,
    Fatal,
}

impl ErrorKind {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::RateLimited | ErrorKind::TransientTransport | ErrorKind::AmbiguousReadFailure
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyResponse => "empty_response",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::TransientTransport => "transient_transport",
            ErrorKind::AmbiguousReadFailure => "ambiguous_read_failure",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::Unimplemented => "unimplemented",
            ErrorKind::Fatal => "fatal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── ClassifiedError ─────────────────────────────────────────────────────────

/// A transport failure tagged with its retry disposition.
///
/// Built fresh for every failed attempt by
/// [`ErrorSignatures::classify`](crate::retry::ErrorSignatures::classify).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub underlying: TransportError,
    pub kind: ErrorKind,
    pub fatal: bool,
    /// Mandatory wait before the next attempt.
    pub backoff: Option<Duration>,
}

impl ClassifiedError {
    pub fn fatal(underlying: TransportError, kind: ErrorKind) -> Self {
        Self {
            underlying,
            kind,
            fatal: true,
            backoff: None,
        }
    }

    pub fn retryable(underlying: TransportError, kind: ErrorKind, backoff: Option<Duration>) -> Self {
        Self {
            underlying,
            kind,
            fatal: false,
            backoff,
        }
    }

    pub fn backoff_delay_millis(&self) -> Option<u64> {
        self.backoff.map(|d| d.as_millis() as u64)
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.underlying)
    }
}

impl std::error::Error for ClassifiedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.underlying)
    }
}

// ─── TraderError ─────────────────────────────────────────────────────────────

/// Terminal error returned by every trader operation.
#[derive(Error, Debug)]
pub enum TraderError {
    #[error("{method} failed: {error}")]
    Call {
        method: String,
        #[source]
        error: ClassifiedError,
    },

    #[error("{method} gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        method: String,
        attempts: u32,
        #[source]
        last: ClassifiedError,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No market for {currency}/{asset}")]
    UnknownMarket { currency: String, asset: String },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} is not implemented for Buzzex")]
    Unimplemented(&'static str),
}

impl TraderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TraderError::Call { error, .. } => error.kind,
            TraderError::RetriesExhausted { last, .. } => last.kind,
            TraderError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            TraderError::Unimplemented(_) => ErrorKind::Unimplemented,
            TraderError::UnknownMarket { .. }
            | TraderError::Catalog(_)
            | TraderError::Config(_) => ErrorKind::Fatal,
        }
    }

    /// True when the failure came from running out of retries rather than
    /// from an error that was fatal on first sight.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, TraderError::RetriesExhausted { .. })
    }

    /// Order id carried by the underlying transport failure, if any.
    pub fn recovered_order_id(&self) -> Option<&str> {
        match self {
            TraderError::Call { error, .. } => error.underlying.recovered_order_id.as_deref(),
            TraderError::RetriesExhausted { last, .. } => {
                last.underlying.recovered_order_id.as_deref()
            }
            _ => None,
        }
    }
}
