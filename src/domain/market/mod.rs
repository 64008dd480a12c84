//! Market domain — the static pair catalog and the bound market.

mod convert;
pub mod wire;

use crate::error::{TraderError, TraderResult};
use crate::shared::{PairId, Precision};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog shipped with the crate.
const BUZZEX_CATALOG: &str = include_str!("buzzex-markets.json");

/// Highest scale a `Decimal` can carry.
pub(crate) const MAX_PRECISION: u32 = 28;

// ─── Market ──────────────────────────────────────────────────────────────────

/// A tradable currency/asset pair with its declared precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub currency: String,
    pub asset: String,
    pub pair: PairId,
    pub precision: Precision,
    pub minimal_order: Option<MinimalOrder>,
}

/// Smallest order the exchange accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimalOrder {
    pub amount: Decimal,
    pub unit: String,
}

impl Market {
    pub fn matches(&self, currency: &str, asset: &str) -> bool {
        self.currency.eq_ignore_ascii_case(currency) && self.asset.eq_ignore_ascii_case(asset)
    }

    pub fn round_price(&self, value: Decimal) -> Decimal {
        self.precision.round_price(value)
    }

    pub fn round_amount(&self, value: Decimal) -> Decimal {
        self.precision.round_amount(value)
    }
}

// ─── MarketCatalog ───────────────────────────────────────────────────────────

/// Immutable table of every market an exchange lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCatalog {
    pub currencies: Vec<String>,
    pub assets: Vec<String>,
    pub markets: Vec<Market>,
}

impl MarketCatalog {
    /// The embedded Buzzex table.
    pub fn buzzex() -> TraderResult<Self> {
        Self::from_json(BUZZEX_CATALOG)
    }

    /// Parse and validate a catalog in the `{ currencies, assets, markets }` format.
    pub fn from_json(json: &str) -> TraderResult<Self> {
        let file: wire::CatalogFile =
            serde_json::from_str(json).map_err(|e| TraderError::Catalog(e.to_string()))?;
        file.try_into()
            .map_err(|e: ValidationError| TraderError::Catalog(e.to_string()))
    }

    pub fn find(&self, currency: &str, asset: &str) -> Option<&Market> {
        self.markets.iter().find(|m| m.matches(currency, asset))
    }

    /// Like [`find`](Self::find), failing with `UnknownMarket`.
    pub fn require(&self, currency: &str, asset: &str) -> TraderResult<Market> {
        self.find(currency, asset)
            .cloned()
            .ok_or_else(|| TraderError::UnknownMarket {
                currency: currency.to_uppercase(),
                asset: asset.to_uppercase(),
            })
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    Multiple(Vec<ValidationError>),
    EmptyCode(String),
    MissingBook(String),
    PrecisionTooLarge { book: String, precision: u32 },
    DuplicatePair(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Multiple(errors) => {
                writeln!(f, "Catalog validation errors:")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            ValidationError::EmptyCode(book) => write!(f, "Empty currency or asset code ({book})"),
            ValidationError::MissingBook(pair) => write!(f, "Missing book for {pair}"),
            ValidationError::PrecisionTooLarge { book, precision } => {
                write!(f, "Precision {precision} too large for {book}")
            }
            ValidationError::DuplicatePair(pair) => write!(f, "Duplicate pair {pair}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = MarketCatalog::buzzex().unwrap();
        assert!(!catalog.markets.is_empty());
        let market = catalog.find("BTC", "ETH").unwrap();
        assert_eq!(market.pair.as_str(), "ETH_BTC");
        assert!(catalog.currencies.contains(&"BTC".to_string()));
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = MarketCatalog::buzzex().unwrap();
        assert_eq!(catalog.find("btc", "eth"), catalog.find("BTC", "ETH"));
    }

    #[test]
    fn test_require_unknown_market() {
        let catalog = MarketCatalog::buzzex().unwrap();
        let err = catalog.require("eur", "xyz").unwrap_err();
        assert!(matches!(
            err,
            TraderError::UnknownMarket { ref currency, ref asset } if currency == "EUR" && asset == "XYZ"
        ));
    }

    #[test]
    fn test_market_rounding_uses_its_precision() {
        let json = r#"{
            "currencies": ["USDT"],
            "assets": ["ETH"],
            "markets": [
                { "pair": ["USDT", "ETH"], "book": "ETH_USDT", "pricePrecision": 3, "amountPrecision": 3 }
            ]
        }"#;
        let catalog = MarketCatalog::from_json(json).unwrap();
        let market = catalog.require("USDT", "ETH").unwrap();
        let v = Decimal::from_str("1.23456").unwrap();
        assert_eq!(market.round_amount(v), Decimal::from_str("1.234").unwrap());
        assert_eq!(market.round_price(v), Decimal::from_str("1.235").unwrap());
        assert!(market.minimal_order.is_none());
    }

    #[test]
    fn test_invalid_catalog_reports_every_problem() {
        let json = r#"{
            "currencies": ["BTC"],
            "assets": ["ETH"],
            "markets": [
                { "pair": ["BTC", ""], "book": "X_BTC", "pricePrecision": 8, "amountPrecision": 8 },
                { "pair": ["BTC", "ETH"], "book": "", "pricePrecision": 8, "amountPrecision": 8 },
                { "pair": ["BTC", "LTC"], "book": "LTC_BTC", "pricePrecision": 40, "amountPrecision": 8 }
            ]
        }"#;
        let err = MarketCatalog::from_json(json).unwrap_err().to_string();
        assert!(err.contains("Empty currency or asset code"));
        assert!(err.contains("Missing book"));
        assert!(err.contains("Precision 40 too large"));
    }

    #[test]
    fn test_malformed_catalog_json() {
        assert!(matches!(
            MarketCatalog::from_json("{}"),
            Err(TraderError::Catalog(_))
        ));
    }
}
