//! Conversions from wire types to domain types for orders.

use super::wire::{CancelEntry, CancelResponse, OrderIdValue, OrderInfoEntry, OrderInfoResponse};
use super::{CancelResult, OrderInfo, ORDER_FEE_PERCENT};
use crate::error::TraderError;
use crate::shared::OrderId;

impl From<OrderIdValue> for OrderId {
    fn from(id: OrderIdValue) -> Self {
        match id {
            OrderIdValue::Number(n) => OrderId::new(n.to_string()),
            OrderIdValue::Text(s) => OrderId::new(s),
        }
    }
}

impl From<OrderInfoEntry> for OrderInfo {
    fn from(entry: OrderInfoEntry) -> Self {
        Self {
            price: entry.rate,
            amount: entry.amount,
            created_at: entry.timestamp_created,
            fee_percent: ORDER_FEE_PERCENT,
        }
    }
}

impl From<CancelEntry> for CancelResult {
    fn from(entry: CancelEntry) -> Self {
        Self {
            executed: entry.vol == entry.vol_exec,
            open: entry.status == "open",
            filled_amount: entry.vol_exec,
        }
    }
}

impl From<CancelResponse> for CancelResult {
    fn from(response: CancelResponse) -> Self {
        response.data.into()
    }
}

/// Pick the requested order out of an `order-info` body.
pub(crate) fn order_info_for(
    mut response: OrderInfoResponse,
    id: &OrderId,
) -> Result<OrderInfo, TraderError> {
    response
        .order_info
        .remove(id.as_str())
        .map(OrderInfo::from)
        .ok_or_else(|| TraderError::MalformedResponse(format!("order-info: no entry for {}", id)))
}
