//! Transport error classification.
//!
//! Signatures are plain substrings matched against the transport's error
//! message. Each exchange supplies its own table; the classification order is
//! fixed:
//!
//! 1. rate limit → retryable after the table's fixed backoff
//! 2. recoverable transport message → retryable, no backoff
//! 3. ambiguous gateway error on a non-mutating call → retryable
//! 4. anything else → fatal

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClassifiedError, ErrorKind, TransportError};

/// Fixed wait after a rate-limit rejection.
pub const RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(2500);

/// Per-exchange error signature table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorSignatures {
    pub exchange: String,
    pub rate_limit: Vec<String>,
    pub rate_limit_backoff_ms: u64,
    pub recoverable: Vec<String>,
    /// Gateway failures after which the request may or may not have been applied.
    pub ambiguous_gateway: Vec<String>,
}

impl Default for ErrorSignatures {
    fn default() -> Self {
        Self::buzzex()
    }
}

impl ErrorSignatures {
    /// The Buzzex table.
    pub fn buzzex() -> Self {
        Self {
            exchange: "buzzex".to_string(),
            rate_limit: vec!["Rate limit exceeded".to_string()],
            rate_limit_backoff_ms: RATE_LIMIT_BACKOFF.as_millis() as u64,
            // Only failures where the request never left this host.
            recoverable: vec![
                "ECONNREFUSED".to_string(),
                "ENOTFOUND".to_string(),
                "EAI_AGAIN".to_string(),
            ],
            ambiguous_gateway: vec![
                "Response code 502".to_string(),
                "Response code 504".to_string(),
                "Response code 522".to_string(),
                "Response code 520".to_string(),
            ],
        }
    }

    pub fn rate_limit_backoff(&self) -> Duration {
        Duration::from_millis(self.rate_limit_backoff_ms)
    }

    /// Tag a transport failure with its retry disposition. Never fails;
    /// unmatched errors are fatal.
    pub fn classify(&self, error: TransportError, non_mutating: bool) -> ClassifiedError {
        if matches_any(&error.message, &self.rate_limit) {
            let backoff = self.rate_limit_backoff();
            return ClassifiedError::retryable(error, ErrorKind::RateLimited, Some(backoff));
        }

        if matches_any(&error.message, &self.recoverable) {
            return ClassifiedError::retryable(error, ErrorKind::TransientTransport, None);
        }

        if non_mutating && matches_any(&error.message, &self.ambiguous_gateway) {
            return ClassifiedError::retryable(error, ErrorKind::AmbiguousReadFailure, None);
        }

        let kind = if error.is_empty_response() {
            ErrorKind::EmptyResponse
        } else {
            ErrorKind::Fatal
        };
        ClassifiedError::fatal(error, kind)
    }
}

fn matches_any(message: &str, signatures: &[String]) -> bool {
    signatures
        .iter()
        .any(|sig| !sig.is_empty() && message.contains(sig.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(message: &str, non_mutating: bool) -> ClassifiedError {
        ErrorSignatures::buzzex().classify(TransportError::new(message), non_mutating)
    }

    #[test]
    fn test_rate_limit_backs_off_regardless_of_mutation() {
        for non_mutating in [true, false] {
            let c = classify("HTTP 429: Rate limit exceeded, slow down", non_mutating);
            assert!(!c.fatal);
            assert_eq!(c.kind, ErrorKind::RateLimited);
            assert_eq!(c.backoff_delay_millis(), Some(2500));
        }
    }

    #[test]
    fn test_gateway_errors_only_retry_reads() {
        for code in ["502", "504", "520", "522"] {
            let msg = format!("Response code {}", code);
            let read = classify(&msg, true);
            assert!(!read.fatal, "{} should retry on reads", code);
            assert_eq!(read.kind, ErrorKind::AmbiguousReadFailure);
            assert_eq!(read.backoff, None);

            let write = classify(&msg, false);
            assert!(write.fatal, "{} must not retry on writes", code);
            assert_eq!(write.kind, ErrorKind::Fatal);
        }
    }

    #[test]
    fn test_recoverable_without_backoff() {
        let c = classify("connect ECONNREFUSED 10.0.0.1:443", false);
        assert!(!c.fatal);
        assert_eq!(c.kind, ErrorKind::TransientTransport);
        assert_eq!(c.backoff, None);
    }

    #[test]
    fn test_empty_response_is_fatal() {
        let c = ErrorSignatures::buzzex().classify(TransportError::empty_response(), true);
        assert!(c.fatal);
        assert_eq!(c.kind, ErrorKind::EmptyResponse);
    }

    #[test]
    fn test_unknown_message_defaults_to_fatal() {
        let c = classify("Insufficient funds", true);
        assert!(c.fatal);
        assert_eq!(c.kind, ErrorKind::Fatal);
        assert_eq!(c.underlying.message, "Insufficient funds");
    }

    #[test]
    fn test_rate_limit_wins_over_gateway() {
        let c = classify("Response code 502 / Rate limit exceeded", false);
        assert_eq!(c.kind, ErrorKind::RateLimited);
    }

    #[test]
    fn test_custom_table_from_json() {
        let json = r#"{
            "exchange": "other",
            "rate_limit": ["EAPI:Rate limit"],
            "rate_limit_backoff_ms": 100,
            "ambiguous_gateway": ["Service:Unavailable"]
        }"#;
        let table: ErrorSignatures = serde_json::from_str(json).unwrap();
        assert_eq!(table.exchange, "other");
        assert_eq!(table.rate_limit_backoff(), Duration::from_millis(100));
        // Missing fields fall back to the default table.
        assert_eq!(table.recoverable, ErrorSignatures::buzzex().recoverable);

        let c = table.classify(TransportError::new("EAPI:Rate limit exceeded"), false);
        assert_eq!(c.backoff_delay_millis(), Some(100));
        let c = table.classify(TransportError::new("Response code 502"), true);
        assert!(c.fatal);
    }

    #[test]
    fn test_empty_signature_never_matches() {
        let table = ErrorSignatures {
            recoverable: vec![String::new()],
            ..ErrorSignatures::buzzex()
        };
        assert!(table.classify(TransportError::new("anything"), true).fatal);
    }
}
