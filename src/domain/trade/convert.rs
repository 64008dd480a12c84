//! Conversions from wire types to domain types for trades.

use super::wire::{TradeIdValue, TradeResponse, TradesResponse};
use super::Trade;
use crate::error::TraderError;
use crate::shared::PairId;

impl From<TradeIdValue> for String {
    fn from(id: TradeIdValue) -> Self {
        match id {
            TradeIdValue::Number(n) => n.to_string(),
            TradeIdValue::Text(s) => s,
        }
    }
}

impl From<TradeResponse> for Trade {
    fn from(t: TradeResponse) -> Self {
        Self {
            id: t.tid.into(),
            occurred_at: t.timestamp,
            price: t.price,
            amount: t.amount,
        }
    }
}

/// Pick the bound pair's trades out of a `trades` body, in upstream order.
pub(crate) fn trades_for_pair(
    mut response: TradesResponse,
    pair: &PairId,
) -> Result<Vec<Trade>, TraderError> {
    let raw = response.remove(pair.as_str()).ok_or_else(|| {
        TraderError::MalformedResponse(format!("trades: no entry for pair {}", pair))
    })?;
    Ok(raw.into_iter().map(Trade::from).collect())
}
