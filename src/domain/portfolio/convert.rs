//! Conversions from wire types to domain types for balances.

use super::wire::{FundEntry, InfoResponse};
use super::PortfolioEntry;

impl From<FundEntry> for PortfolioEntry {
    fn from(FundEntry(asset_name, amount): FundEntry) -> Self {
        Self { asset_name, amount }
    }
}

impl From<InfoResponse> for Vec<PortfolioEntry> {
    fn from(info: InfoResponse) -> Self {
        info.funds.into_iter().map(PortfolioEntry::from).collect()
    }
}
