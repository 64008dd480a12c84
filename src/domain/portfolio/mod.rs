//! Portfolio domain — account balances.

pub mod client;
mod convert;
pub mod wire;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balance of one asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioEntry {
    pub asset_name: String,
    pub amount: Decimal,
}

impl PortfolioEntry {
    pub fn is_empty(&self) -> bool {
        self.amount.is_zero()
    }
}
