//! The single call primitive the adapter is built on.
//!
//! A [`Transport`] performs exactly one attempt per `invoke`: network call,
//! signing and timeout are its business. Retrying, classification and
//! response mapping happen above it.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{HttpTransport, NoSigner, RequestSigner};

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

/// Request parameters, keyed by wire name.
pub type Params = BTreeMap<String, String>;

/// Outcome of one transport attempt. `Ok(None)` means the exchange answered
/// with neither an error nor a payload.
pub type RawResponse = Result<Option<Value>, TransportError>;

/// Opaque, single-attempt exchange call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn invoke(&self, method: &str, params: &Params) -> RawResponse;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn invoke(&self, method: &str, params: &Params) -> RawResponse {
        (**self).invoke(method, params).await
    }
}

/// Build a [`Params`] map from string pairs.
pub fn params<I, K, V>(pairs: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
