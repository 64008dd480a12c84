//! Shared newtypes and utilities used across all domain modules.
//!
//! The newtypes are serialization-transparent: they serialize/deserialize
//! identically to the raw strings the exchange sends.

pub mod precision;
pub mod serde_util;

pub use precision::{to_plain_string, Precision};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── OrderId ─────────────────────────────────────────────────────────────────

/// Exchange-assigned order identifier (a placement `txid`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for OrderId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

// ─── PairId ──────────────────────────────────────────────────────────────────

/// Exchange book identifier for a market (e.g. `"ETH_BTC"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(String);

impl PairId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ticker responses key the pair in lower case.
    pub fn ticker_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PairId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PairId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ─── Side ────────────────────────────────────────────────────────────────────

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Wire value for the `type` placement parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}
