//! Ticker domain — best bid and ask for the bound pair.

pub mod client;
mod convert;
pub mod wire;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top of book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticker {
    pub bid: Decimal,
    pub ask: Decimal,
}

impl Ticker {
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }

    pub fn mid(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_spread_and_mid() {
        let t = Ticker {
            bid: Decimal::from_str("0.030").unwrap(),
            ask: Decimal::from_str("0.032").unwrap(),
        };
        assert_eq!(t.spread(), Decimal::from_str("0.002").unwrap());
        assert_eq!(t.mid(), Decimal::from_str("0.031").unwrap());
    }
}
