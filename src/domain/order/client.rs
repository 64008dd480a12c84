//! Orders sub-client — place, look up and cancel orders.

use rust_decimal::Decimal;

use super::convert::order_info_for;
use super::wire::{CancelResponse, OrderInfoResponse};
use super::{reconcile, CancelResult, OrderInfo, OrderOutcome, OrderRequest};
use crate::client::Trader;
use crate::domain::decode;
use crate::error::{TraderError, TraderResult};
use crate::retry::CallKind;
use crate::shared::{OrderId, Side};
use crate::transport::{params, Transport};

pub struct Orders<'a, T> {
    pub(crate) trader: &'a Trader<T>,
}

impl<'a, T: Transport> Orders<'a, T> {
    /// Build a request for the bound market: the price is rounded, the
    /// amount is left as given.
    pub fn request(&self, side: Side, amount: Decimal, price: Decimal) -> OrderRequest {
        OrderRequest {
            side,
            amount,
            price: self.trader.market().round_price(price),
        }
    }

    /// Submit a limit order.
    ///
    /// Gateway errors are never retried here since the order may already
    /// exist. An `Uncertain` outcome must be checked before resubmitting.
    pub async fn place(&self, side: Side, amount: Decimal, price: Decimal) -> TraderResult<OrderOutcome> {
        let request = self.request(side, amount, price);
        let pair = &self.trader.market().pair;

        tracing::debug!(
            pair = %pair,
            side = %request.side,
            amount = %request.amount_param(),
            rate = %request.rate_param(),
            "Placing order"
        );

        let raw = self
            .trader
            .call(
                "trade",
                params([
                    ("pair", pair.to_string()),
                    ("type", request.side.as_str().to_string()),
                    ("rate", request.rate_param()),
                    ("amount", request.amount_param()),
                ]),
                CallKind::Mutation,
                Ok,
            )
            .await;

        reconcile(raw)
    }

    pub async fn get(&self, id: &OrderId) -> TraderResult<OrderInfo> {
        self.trader
            .call(
                "order-info",
                params([("param", id.as_str())]),
                CallKind::Read,
                |body| {
                    let response: OrderInfoResponse = decode("order-info", body)?;
                    order_info_for(response, id)
                },
            )
            .await
    }

    /// Cancel an order. Safe to repeat, so ambiguous gateway errors are retried.
    pub async fn cancel(&self, id: &OrderId) -> TraderResult<CancelResult> {
        self.trader
            .call(
                "cancel-order",
                params([("param", id.as_str())]),
                CallKind::IdempotentWrite,
                |body| {
                    let response: CancelResponse = decode("cancel-order", body)?;
                    Ok(response.into())
                },
            )
            .await
    }

    /// Fill status polling. Buzzex offers no endpoint for it.
    pub async fn check(&self, _id: &OrderId) -> TraderResult<CancelResult> {
        Err(TraderError::Unimplemented("checkOrder"))
    }

    /// Open-order listing. Buzzex offers no endpoint for it.
    pub async fn open(&self) -> TraderResult<Vec<OrderInfo>> {
        Err(TraderError::Unimplemented("getOpenOrders"))
    }
}
