//! Conversion: CatalogFile → MarketCatalog (TryFrom + validation).

use super::wire;
use super::{Market, MarketCatalog, MinimalOrder, ValidationError, MAX_PRECISION};
use crate::shared::{PairId, Precision};
use std::collections::HashSet;

impl TryFrom<wire::MarketEntry> for Market {
    type Error = ValidationError;

    fn try_from(source: wire::MarketEntry) -> Result<Self, Self::Error> {
        let (currency, asset) = source.pair;
        let label = format!("{}/{}", currency, asset);

        if currency.trim().is_empty() || asset.trim().is_empty() {
            return Err(ValidationError::EmptyCode(source.book));
        }
        if source.book.trim().is_empty() {
            return Err(ValidationError::MissingBook(label));
        }
        let widest = source.price_precision.max(source.amount_precision);
        if widest > MAX_PRECISION {
            return Err(ValidationError::PrecisionTooLarge {
                book: source.book,
                precision: widest,
            });
        }

        Ok(Market {
            currency: currency.to_uppercase(),
            asset: asset.to_uppercase(),
            pair: PairId::new(source.book),
            precision: Precision::new(source.price_precision, source.amount_precision),
            minimal_order: source.minimal_order.map(|m| MinimalOrder {
                amount: m.amount,
                unit: m.unit,
            }),
        })
    }
}

impl TryFrom<wire::CatalogFile> for MarketCatalog {
    type Error = ValidationError;

    fn try_from(source: wire::CatalogFile) -> Result<Self, Self::Error> {
        let mut errors: Vec<ValidationError> = Vec::new();
        let mut markets: Vec<Market> = Vec::with_capacity(source.markets.len());
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for entry in source.markets {
            match Market::try_from(entry) {
                Ok(market) => {
                    let key = (market.currency.clone(), market.asset.clone());
                    if seen.insert(key) {
                        markets.push(market);
                    } else {
                        errors.push(ValidationError::DuplicatePair(format!(
                            "{}/{}",
                            market.currency, market.asset
                        )));
                    }
                }
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(ValidationError::Multiple(errors));
        }

        Ok(MarketCatalog {
            currencies: source.currencies,
            assets: source.assets,
            markets,
        })
    }
}
