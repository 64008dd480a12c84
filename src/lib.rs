//! # Buzzex trader
//!
//! Exchange adapter for Buzzex: one [`Trader`](client::Trader) bound to a
//! currency/asset market, with classified retries, precision rounding and
//! order reconciliation behind a flat async API.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Shared newtypes, precision rules, domain models and the market catalog
//! 2. **Transport** — The single-attempt `Transport` seam, plus `HttpTransport` (feature `http`)
//! 3. **Retry** — Error classification against per-exchange signature tables and the retry invoker
//! 4. **High-Level Client** — `Trader` with nested sub-clients and the flat trading API
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use buzzex_trader::prelude::*;
//!
//! let trader = Trader::builder()
//!     .currency("BTC")
//!     .asset("ETH")
//!     .build(HttpTransport::new(DEFAULT_API_URL)?)?;
//!
//! let ticker = trader.get_ticker().await?;
//! let outcome = trader.buy(Decimal::new(5, 1), ticker.bid).await?;
//! if outcome.is_uncertain() {
//!     // look the order up before placing it again
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and precision rules used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, sub-clients.
pub mod domain;

/// Adapter error types.
pub mod error;

/// Network and timing constants.
pub mod network;

/// Static capability descriptor.
pub mod capabilities;

// ── Layer 2: Transport ───────────────────────────────────────────────────────

/// Single-attempt exchange calls.
pub mod transport;

// ── Layer 3: Retry ───────────────────────────────────────────────────────────

/// Error classification and retry invoker.
pub mod retry;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `Trader` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{to_plain_string, OrderId, PairId, Precision, Side};

    // Domain types
    pub use crate::domain::market::{Market, MarketCatalog, MinimalOrder};
    pub use crate::domain::order::{
        reconcile, CancelResult, OrderInfo, OrderOutcome, OrderRequest,
    };
    pub use crate::domain::portfolio::PortfolioEntry;
    pub use crate::domain::ticker::Ticker;
    pub use crate::domain::trade::Trade;

    // Errors
    pub use crate::error::{
        ClassifiedError, ErrorKind, TraderError, TraderResult, TransportError,
    };

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_TIMEOUT, POLL_INTERVAL};

    // Transport
    pub use crate::transport::{params, Params, RawResponse, Transport};
    #[cfg(feature = "http")]
    pub use crate::transport::{HttpTransport, NoSigner, RequestSigner};

    // Retry
    pub use crate::retry::{CallKind, ErrorSignatures, RetryConfig, RetryInvoker};

    // Client + sub-clients
    pub use crate::capabilities::Capabilities;
    pub use crate::client::{
        OrdersClient, PortfolioClient, TickersClient, Trader, TraderBuilder, TraderConfig,
        TradesClient, MAKER_FEE,
    };
}
