//! Trades sub-client — public trade history.

use chrono::{DateTime, Utc};

use super::convert::trades_for_pair;
use super::wire::TradesResponse;
use super::{order_trades, Trade};
use crate::client::Trader;
use crate::domain::decode;
use crate::error::TraderResult;
use crate::retry::CallKind;
use crate::transport::{params, Transport};

pub struct Trades<'a, T> {
    pub(crate) trader: &'a Trader<T>,
}

impl<'a, T: Transport> Trades<'a, T> {
    /// Fetch recent trades for the bound pair.
    ///
    /// `since` is forwarded to the exchange as a hint (`PAIR/<unix secs>`);
    /// nothing is filtered locally, so older trades may be included.
    pub async fn get(
        &self,
        since: Option<DateTime<Utc>>,
        descending: bool,
    ) -> TraderResult<Vec<Trade>> {
        let pair = self.trader.market().pair.clone();
        let param = match since {
            Some(since) => format!("{}/{}", pair, since.timestamp()),
            None => pair.to_string(),
        };

        self.trader
            .call("trades", params([("param", param)]), CallKind::Read, |body| {
                let response: TradesResponse = decode("trades", body)?;
                Ok(order_trades(trades_for_pair(response, &pair)?, descending))
            })
            .await
    }
}
