//! Market precision rounding.
//!
//! Amounts are truncated toward zero, prices round to nearest.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

/// Decimal places a market accepts for prices and amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precision {
    pub price: u32,
    pub amount: u32,
}

impl Precision {
    pub fn new(price: u32, amount: u32) -> Self {
        Self { price, amount }
    }

    /// Truncate toward zero at the amount precision.
    pub fn round_amount(&self, value: Decimal) -> Decimal {
        value
            .round_dp_with_strategy(self.amount, RoundingStrategy::ToZero)
            .normalize()
    }

    /// Round half away from zero at the price precision.
    pub fn round_price(&self, value: Decimal) -> Decimal {
        value
            .round_dp_with_strategy(self.price, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
    }
}

/// Render a `Decimal` as a literal decimal string: no exponent, no trailing zeros.
pub fn to_plain_string(value: &Decimal) -> String {
    let normalized = value.normalize();
    if normalized.is_zero() {
        return "0".to_string();
    }
    normalized.to_string()
}
