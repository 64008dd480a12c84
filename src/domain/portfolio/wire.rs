//! Wire types for the `getinfo` endpoint.

use crate::shared::serde_util;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct InfoResponse {
    pub funds: Vec<FundEntry>,
}

/// `[assetName, amount]`
#[derive(Debug, Clone, Deserialize)]
pub struct FundEntry(
    pub String,
    #[serde(deserialize_with = "serde_util::decimal::deserialize")] pub Decimal,
);
