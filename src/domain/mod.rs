//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types
//! - `wire.rs` — Raw serde structs matching Buzzex responses
//! - `convert.rs` — `TryFrom`/`From` conversions with validation
//! - `client.rs` — Sub-client issuing the calls through the retry layer

pub mod market;
pub mod order;
pub mod portfolio;
pub mod ticker;
pub mod trade;

use crate::error::TraderError;

/// Decode a raw body into a wire type, reporting shape mismatches as
/// `MalformedResponse`.
pub(crate) fn decode<W: serde::de::DeserializeOwned>(
    what: &str,
    body: serde_json::Value,
) -> Result<W, TraderError> {
    serde_json::from_value(body)
        .map_err(|e| TraderError::MalformedResponse(format!("{}: {}", what, e)))
}
