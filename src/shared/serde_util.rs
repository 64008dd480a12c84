//! Custom serde helpers for Buzzex wire formats.
//!
//! Buzzex is inconsistent about numbers: the same field arrives as a JSON
//! number on one endpoint and as a numeric string on another.

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use std::fmt;
use std::str::FromStr;

struct FlexibleDecimal;

impl<'de> Visitor<'de> for FlexibleDecimal {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal number or numeric string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        let trimmed = v.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| E::custom(format!("Invalid decimal '{}': {}", v, e)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        // Go through the shortest round-trip representation so 0.1 stays 0.1.
        self.visit_str(&v.to_string())
    }
}

/// Deserializes a `Decimal` from either a JSON number or a numeric string.
pub mod decimal {
    use super::FlexibleDecimal;
    use rust_decimal::Decimal;
    use serde::Deserializer;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FlexibleDecimal)
    }
}

/// Deserializes Unix seconds (number or string, possibly fractional) into
/// `DateTime<Utc>`, rounding to the nearest second.
pub mod timestamp_secs {
    use super::FlexibleDecimal;
    use chrono::{DateTime, Utc};
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::RoundingStrategy;
    use serde::Deserializer;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = deserializer.deserialize_any(FlexibleDecimal)?;
        let secs = raw
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", raw)))?;
        DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", secs)))
    }
}
