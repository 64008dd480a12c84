//! Classified retries for transport calls.
//!
//! [`RetryInvoker::invoke`] runs one transport attempt at a time, classifies
//! every failure with the exchange's [`ErrorSignatures`] and either waits and
//! tries again or gives up with a terminal [`TraderError`].

pub mod classify;

pub use classify::{ErrorSignatures, RATE_LIMIT_BACKOFF};

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::error::{TraderError, TraderResult, TransportError};

/// How a call may be repeated after an ambiguous failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Only reads state.
    Read,
    /// Changes state, but repeating it converges on the same result (cancel).
    IdempotentWrite,
    /// Changes state; a blind repeat could duplicate the effect (placement).
    Mutation,
}

impl CallKind {
    /// Whether gateway errors with an unknown outcome may be retried.
    pub fn is_non_mutating(&self) -> bool {
        !matches!(self, CallKind::Mutation)
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Delay before the first retry when the classifier imposes none.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add jitter to the delay.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(4),
            backoff_factor: 1.2,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Retry straight away, only waiting when the classifier demands a backoff.
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_factor: 1.0,
            jitter: false,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

/// Re-issues transport calls according to their classified failures.
///
/// Holds no mutable state, so one invoker serves any number of concurrent
/// calls.
#[derive(Debug, Clone, Default)]
pub struct RetryInvoker {
    config: RetryConfig,
    signatures: ErrorSignatures,
}

impl RetryInvoker {
    pub fn new(config: RetryConfig, signatures: ErrorSignatures) -> Self {
        Self { config, signatures }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn signatures(&self) -> &ErrorSignatures {
        &self.signatures
    }

    /// Run `fetch` until it yields a body, then map the body with `handle`.
    ///
    /// A missing or `null` body counts as an `Empty response` failure. Fatal
    /// failures return [`TraderError::Call`] at once; retryable ones are retried
    /// up to `max_retries` times and then surface as
    /// [`TraderError::RetriesExhausted`]. Errors from `handle` are returned
    /// as-is and never retried.
    pub async fn invoke<T, F, Fut, H>(
        &self,
        method: &str,
        call: CallKind,
        mut fetch: F,
        handle: H,
    ) -> TraderResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<Value>, TransportError>>,
        H: FnOnce(Value) -> TraderResult<T>,
    {
        let mut attempt: u32 = 0;

        loop {
            let failure = match fetch().await {
                Ok(Some(body)) if !body.is_null() => return handle(body),
                Ok(_) => TransportError::empty_response(),
                Err(e) => e,
            };

            let classified = self.signatures.classify(failure, call.is_non_mutating());

            if classified.fatal {
                tracing::warn!(
                    method,
                    kind = %classified.kind,
                    attempt = attempt + 1,
                    "Call failed: {}",
                    classified.underlying
                );
                return Err(TraderError::Call {
                    method: method.to_string(),
                    error: classified,
                });
            }

            if attempt >= self.config.max_retries {
                tracing::warn!(
                    method,
                    kind = %classified.kind,
                    attempts = attempt + 1,
                    "Retries exhausted: {}",
                    classified.underlying
                );
                return Err(TraderError::RetriesExhausted {
                    method: method.to_string(),
                    attempts: attempt + 1,
                    last: classified,
                });
            }

            let delay = classified
                .backoff
                .unwrap_or_else(|| self.config.delay_for_attempt(attempt));
            tracing::debug!(
                method,
                kind = %classified.kind,
                attempt = attempt + 1,
                max = self.config.max_retries,
                delay_ms = delay.as_millis() as u64,
                "Retrying after: {}",
                classified.underlying
            );
            if !delay.is_zero() {
                futures_timer::Delay::new(delay).await;
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn invoker(max_retries: u32) -> RetryInvoker {
        RetryInvoker::new(RetryConfig::immediate(max_retries), ErrorSignatures::buzzex())
    }

    /// Replays scripted attempt results, counting how many were consumed.
    struct Script {
        steps: Mutex<VecDeque<Result<Option<Value>, TransportError>>>,
        calls: Cell<u32>,
    }

    impl Script {
        fn new(steps: Vec<Result<Option<Value>, TransportError>>) -> Self {
            Self {
                steps: Mutex::new(steps.into()),
                calls: Cell::new(0),
            }
        }

        fn next(&self) -> impl Future<Output = Result<Option<Value>, TransportError>> {
            self.calls.set(self.calls.get() + 1);
            let step = self
                .steps
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("script exhausted")));
            async move { step }
        }
    }

    fn gateway() -> Result<Option<Value>, TransportError> {
        Err(TransportError::new("Response code 502"))
    }

    #[test]
    fn test_call_kind_mutation_flag() {
        assert!(CallKind::Read.is_non_mutating());
        assert!(CallKind::IdempotentWrite.is_non_mutating());
        assert!(!CallKind::Mutation.is_non_mutating());
    }

    #[test]
    fn test_retry_config_delay_for_attempt_no_jitter() {
        let config = RetryConfig {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: false,
        };
        assert_eq!(config.delay_for_attempt(0).as_millis(), 100);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 200);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 400);
    }

    #[test]
    fn test_retry_config_delay_caps_at_max() {
        let config = RetryConfig {
            max_retries: 5,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(2000),
            backoff_factor: 10.0,
            jitter: false,
        };
        assert_eq!(config.delay_for_attempt(3).as_millis(), 2000);
    }

    #[test]
    fn test_immediate_config_never_waits() {
        let config = RetryConfig::immediate(3);
        for attempt in 0..5 {
            assert_eq!(config.delay_for_attempt(attempt), Duration::ZERO);
        }
    }

    #[tokio::test]
    async fn test_success_passes_body_to_handler() {
        let script = Script::new(vec![Ok(Some(serde_json::json!({"ok": 1})))]);
        let out = invoker(3)
            .invoke("ticker", CallKind::Read, || script.next(), |body| {
                Ok(body["ok"].as_i64())
            })
            .await
            .unwrap();
        assert_eq!(out, Some(1));
        assert_eq!(script.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_read_retries_through_gateway_errors() {
        let script = Script::new(vec![gateway(), gateway(), Ok(Some(serde_json::json!(7)))]);
        let out = invoker(3)
            .invoke("ticker", CallKind::Read, || script.next(), |body| {
                Ok(body.as_i64())
            })
            .await
            .unwrap();
        assert_eq!(out, Some(7));
        assert_eq!(script.calls.get(), 3);
    }

    #[tokio::test]
    async fn test_mutation_does_not_retry_gateway_errors() {
        let script = Script::new(vec![gateway(), Ok(Some(serde_json::json!(7)))]);
        let err = invoker(3)
            .invoke("trade", CallKind::Mutation, || script.next(), |_| Ok(()))
            .await
            .unwrap_err();
        assert!(!err.is_exhausted());
        assert_eq!(err.kind(), ErrorKind::Fatal);
        assert_eq!(script.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_bounds_attempts() {
        let script = Script::new((0..10).map(|_| gateway()).collect());
        let err = invoker(3)
            .invoke("ticker", CallKind::Read, || script.next(), |_| Ok(()))
            .await
            .unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(err.kind(), ErrorKind::AmbiguousReadFailure);
        assert_eq!(script.calls.get(), 4);
        match err {
            TraderError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 4),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_body_is_fatal() {
        let script = Script::new(vec![Ok(None), Ok(Some(Value::Null))]);
        let err = invoker(3)
            .invoke("portfolio", CallKind::Read, || script.next(), |_| Ok(()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResponse);
        assert_eq!(script.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_handler_errors_are_not_retried() {
        let script = Script::new(vec![Ok(Some(serde_json::json!({})))]);
        let err = invoker(3)
            .invoke("ticker", CallKind::Read, || script.next(), |_| {
                Err::<(), _>(TraderError::MalformedResponse("missing field".into()))
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert_eq!(script.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_waits_table_backoff() {
        let signatures = ErrorSignatures {
            rate_limit_backoff_ms: 20,
            ..ErrorSignatures::buzzex()
        };
        let invoker = RetryInvoker::new(RetryConfig::immediate(1), signatures);
        let script = Script::new(vec![
            Err(TransportError::new("Rate limit exceeded")),
            Ok(Some(serde_json::json!(true))),
        ]);
        let started = std::time::Instant::now();
        let out = invoker
            .invoke("trade", CallKind::Mutation, || script.next(), |b| Ok(b.as_bool()))
            .await
            .unwrap();
        assert_eq!(out, Some(true));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_zero_retries_exhausts_on_first_retryable_failure() {
        let script = Script::new(vec![gateway()]);
        let err = invoker(0)
            .invoke("ticker", CallKind::Read, || script.next(), |_| Ok(()))
            .await
            .unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(script.calls.get(), 1);
    }
}
