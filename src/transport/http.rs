//! reqwest-backed [`Transport`] for the Buzzex REST API.
//!
//! One attempt per call. The `param` entry becomes a path segment
//! (`/{method}/{param}`); any other params are sent as a JSON body. Failures
//! are reported as messages the default signature table understands:
//! `Response code <status>`, `Rate limit exceeded`, `Request timed out`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use super::{Params, RawResponse, Transport};
use crate::error::{TraderError, TransportError};
use crate::network::DEFAULT_TIMEOUT;

/// Path parameter key.
pub const PATH_PARAM: &str = "param";

/// Attaches exchange credentials to an outgoing request.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, method: &str, params: &Params, request: RequestBuilder) -> RequestBuilder;
}

/// Leaves requests unsigned (public endpoints only).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSigner;

impl RequestSigner for NoSigner {
    fn sign(&self, _method: &str, _params: &Params, request: RequestBuilder) -> RequestBuilder {
        request
    }
}

/// HTTP client performing single-attempt Buzzex calls.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
    timeout: Duration,
    signer: Arc<dyn RequestSigner>,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TraderError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TraderError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| TraderError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
            signer: Arc::new(NoSigner),
        })
    }

    pub fn with_signer(mut self, signer: impl RequestSigner + 'static) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-attempt request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url_for(&self, method: &str, params: &Params) -> String {
        match params.get(PATH_PARAM) {
            Some(param) => format!(
                "{}/{}/{}",
                self.base_url,
                method,
                urlencoding::encode(param).replace("%2F", "/")
            ),
            None => format!("{}/{}", self.base_url, method),
        }
    }

    async fn do_request(&self, method: &str, params: &Params) -> RawResponse {
        let url = self.url_for(method, params);
        let body: Params = params
            .iter()
            .filter(|(k, _)| k.as_str() != PATH_PARAM)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let mut req = if body.is_empty() {
            self.client.get(&url)
        } else {
            self.client.post(&url).json(&body)
        };
        req = self.signer.sign(method, params, req);

        tracing::trace!(method, url = %url, "Buzzex request");

        let resp = req.send().await.map_err(from_reqwest)?;
        let status = resp.status();
        let text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str::<Value>(&text)
            .map(Some)
            .map_err(|e| TransportError::new(format!("Invalid JSON body: {}", e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn invoke(&self, method: &str, params: &Params) -> RawResponse {
        self.do_request(method, params).await
    }
}

/// Map a non-2xx status into the message form the classifier matches on.
pub(crate) fn status_error(status: StatusCode, body: &str) -> TransportError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return TransportError::new("Rate limit exceeded");
    }
    let body = body.trim();
    if body.is_empty() {
        TransportError::new(format!("Response code {}", status.as_u16()))
    } else {
        TransportError::new(format!("Response code {} ({})", status.as_u16(), body))
    }
}

fn from_reqwest(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::new("Request timed out")
    } else if e.is_connect() {
        TransportError::new(format!("ECONNREFUSED: {}", e))
    } else {
        TransportError::new(e.to_string())
    }
}
