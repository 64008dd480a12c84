//! Static descriptor of what the Buzzex adapter offers.

use serde::Serialize;

use crate::domain::market::{Market, MarketCatalog};

/// Version of the order-broker interface this adapter implements.
pub const BROKER_API_VERSION: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub name: &'static str,
    pub slug: &'static str,
    pub currencies: Vec<String>,
    pub assets: Vec<String>,
    pub markets: Vec<Market>,
    /// Credential fields a caller must supply to trade.
    pub requires: Vec<&'static str>,
    /// How history is paged: by `date`.
    pub provides_history: &'static str,
    pub provides_full_history: bool,
    /// Field that uniquely identifies a trade.
    pub tid: &'static str,
    pub tradable: bool,
    pub broker_api_version: f64,
}

impl Capabilities {
    pub fn buzzex(catalog: &MarketCatalog) -> Self {
        Self {
            name: "Buzzex",
            slug: "Buzzex",
            currencies: catalog.currencies.clone(),
            assets: catalog.assets.clone(),
            markets: catalog.markets.clone(),
            requires: vec!["key", "secret"],
            provides_history: "date",
            provides_full_history: true,
            tid: "tid",
            tradable: true,
            broker_api_version: BROKER_API_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buzzex_descriptor() {
        let catalog = MarketCatalog::buzzex().unwrap();
        let caps = Capabilities::buzzex(&catalog);
        assert_eq!(caps.name, "Buzzex");
        assert_eq!(caps.requires, ["key", "secret"]);
        assert_eq!(caps.markets.len(), catalog.markets.len());
        assert!(caps.tradable);
    }

    #[test]
    fn test_serializes_camel_case() {
        let catalog = MarketCatalog::buzzex().unwrap();
        let json = serde_json::to_value(Capabilities::buzzex(&catalog)).unwrap();
        assert_eq!(json["providesHistory"], "date");
        assert_eq!(json["providesFullHistory"], true);
        assert_eq!(json["tid"], "tid");
        assert_eq!(json["brokerApiVersion"], 0.6);
    }
}
