//! Network and timing constants for the Buzzex adapter.

use std::time::Duration;

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.buzzex.io";

/// Per-attempt transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How often the trading engine should poll this exchange.
pub const POLL_INTERVAL: Duration = Duration::from_millis(3100);
