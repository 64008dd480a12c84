//! Portfolio sub-client — account balances.

use super::wire::InfoResponse;
use super::PortfolioEntry;
use crate::client::Trader;
use crate::domain::decode;
use crate::error::TraderResult;
use crate::retry::CallKind;
use crate::transport::{Params, Transport};

pub struct Portfolio<'a, T> {
    pub(crate) trader: &'a Trader<T>,
}

impl<'a, T: Transport> Portfolio<'a, T> {
    /// Fetch every balance the account holds. Rebuilt from scratch on each call.
    pub async fn get(&self) -> TraderResult<Vec<PortfolioEntry>> {
        self.trader
            .call("getinfo", Params::new(), CallKind::Read, |body| {
                let info: InfoResponse = decode("getinfo", body)?;
                Ok(info.into())
            })
            .await
    }
}
