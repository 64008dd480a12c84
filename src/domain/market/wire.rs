//! Wire types for the static market catalog file.

use crate::shared::serde_util;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Whole catalog file: currencies, assets and per-pair metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub currencies: Vec<String>,
    pub assets: Vec<String>,
    pub markets: Vec<MarketEntry>,
}

/// One tradable pair as listed in the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEntry {
    /// `[currency, asset]`
    pub pair: (String, String),
    pub book: String,
    pub price_precision: u32,
    pub amount_precision: u32,
    #[serde(default)]
    pub minimal_order: Option<MinimalOrderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MinimalOrderEntry {
    #[serde(deserialize_with = "serde_util::decimal::deserialize")]
    pub amount: Decimal,
    pub unit: String,
}
