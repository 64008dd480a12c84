//! Conversions from wire types to domain types for the ticker.

use super::wire::{TickerEntry, TickerResponse};
use super::Ticker;
use crate::error::TraderError;
use crate::shared::PairId;

impl From<TickerEntry> for Ticker {
    fn from(entry: TickerEntry) -> Self {
        Self {
            bid: entry.highest_bid,
            ask: entry.lowest_ask,
        }
    }
}

/// Take the bound pair's entry from the first element of a `ticker` body.
pub(crate) fn ticker_for_pair(
    response: TickerResponse,
    pair: &PairId,
) -> Result<Ticker, TraderError> {
    let key = pair.ticker_key();
    response
        .into_iter()
        .next()
        .and_then(|mut entries| entries.remove(&key))
        .map(Ticker::from)
        .ok_or_else(|| TraderError::MalformedResponse(format!("ticker: no entry for {}", key)))
}
