//! Ticker sub-client.

use super::convert::ticker_for_pair;
use super::wire::TickerResponse;
use super::Ticker;
use crate::client::Trader;
use crate::domain::decode;
use crate::error::TraderResult;
use crate::retry::CallKind;
use crate::transport::{params, Transport};

pub struct Tickers<'a, T> {
    pub(crate) trader: &'a Trader<T>,
}

impl<'a, T: Transport> Tickers<'a, T> {
    pub async fn get(&self) -> TraderResult<Ticker> {
        let pair = &self.trader.market().pair;
        self.trader
            .call(
                "ticker",
                params([("param", pair.as_str())]),
                CallKind::Read,
                |body| {
                    let response: TickerResponse = decode("ticker", body)?;
                    ticker_for_pair(response, pair)
                },
            )
            .await
    }
}
