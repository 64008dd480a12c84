//! High-level client — `Trader` bound to one Buzzex market.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the market binding, and the flat
//! trading API that delegates to the sub-clients.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::capabilities::Capabilities;
use crate::domain::market::{Market, MarketCatalog};
use crate::domain::order::client::Orders;
use crate::domain::order::{CancelResult, OrderInfo, OrderOutcome};
use crate::domain::portfolio::client::Portfolio;
use crate::domain::portfolio::PortfolioEntry;
use crate::domain::ticker::client::Tickers;
use crate::domain::ticker::Ticker;
use crate::domain::trade::client::Trades;
use crate::domain::trade::Trade;
use crate::error::{TraderError, TraderResult};
use crate::network::POLL_INTERVAL;
use crate::retry::{CallKind, ErrorSignatures, RetryConfig, RetryInvoker};
use crate::shared::{OrderId, Side};
use crate::transport::{Params, Transport};

// Re-export sub-client types for convenience.
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::portfolio::client::Portfolio as PortfolioClient;
pub use crate::domain::ticker::client::Tickers as TickersClient;
pub use crate::domain::trade::client::Trades as TradesClient;

/// Static maker fee, as a fraction (0.02 %).
pub const MAKER_FEE: Decimal = Decimal::from_parts(2, 0, 0, false, 4);

/// Buzzex trading adapter bound to one currency/asset market.
///
/// Every operation takes `&self`; the only state is the market binding and
/// the read-only retry tables, so one `Trader` can serve concurrent calls.
#[derive(Clone)]
pub struct Trader<T> {
    pub(crate) transport: T,
    pub(crate) market: Market,
    pub(crate) catalog: Arc<MarketCatalog>,
    pub(crate) invoker: RetryInvoker,
}

impl<T> fmt::Debug for Trader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trader")
            .field("market", &self.market)
            .field("retry", &self.invoker)
            .finish_non_exhaustive()
    }
}

impl Trader<()> {
    pub fn builder() -> TraderBuilder {
        TraderBuilder::default()
    }
}

impl<T> Trader<T> {
    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn catalog(&self) -> &MarketCatalog {
        &self.catalog
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn retry(&self) -> &RetryInvoker {
        &self.invoker
    }

    /// Static maker fee. Never touches the network.
    pub fn get_fee(&self) -> Decimal {
        MAKER_FEE
    }

    /// How often the trading engine should poll this exchange.
    pub fn interval(&self) -> Duration {
        POLL_INTERVAL
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::buzzex(&self.catalog)
    }

    /// Truncate toward zero to the market's amount precision.
    pub fn round_amount(&self, amount: Decimal) -> Decimal {
        self.market.round_amount(amount)
    }

    /// Round half away from zero to the market's price precision.
    pub fn round_price(&self, price: Decimal) -> Decimal {
        self.market.round_price(price)
    }
}

impl<T: Transport> Trader<T> {
    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn trades(&self) -> Trades<'_, T> {
        Trades { trader: self }
    }

    pub fn portfolio(&self) -> Portfolio<'_, T> {
        Portfolio { trader: self }
    }

    pub fn tickers(&self) -> Tickers<'_, T> {
        Tickers { trader: self }
    }

    pub fn orders(&self) -> Orders<'_, T> {
        Orders { trader: self }
    }

    // ── Flat trading API ─────────────────────────────────────────────────

    pub async fn get_trades(
        &self,
        since: Option<DateTime<Utc>>,
        descending: bool,
    ) -> TraderResult<Vec<Trade>> {
        self.trades().get(since, descending).await
    }

    pub async fn get_portfolio(&self) -> TraderResult<Vec<PortfolioEntry>> {
        self.portfolio().get().await
    }

    pub async fn get_ticker(&self) -> TraderResult<Ticker> {
        self.tickers().get().await
    }

    pub async fn trade(
        &self,
        side: Side,
        amount: Decimal,
        price: Decimal,
    ) -> TraderResult<OrderOutcome> {
        self.orders().place(side, amount, price).await
    }

    pub async fn buy(&self, amount: Decimal, price: Decimal) -> TraderResult<OrderOutcome> {
        self.trade(Side::Buy, amount, price).await
    }

    pub async fn sell(&self, amount: Decimal, price: Decimal) -> TraderResult<OrderOutcome> {
        self.trade(Side::Sell, amount, price).await
    }

    pub async fn get_order(&self, id: &OrderId) -> TraderResult<OrderInfo> {
        self.orders().get(id).await
    }

    pub async fn cancel_order(&self, id: &OrderId) -> TraderResult<CancelResult> {
        self.orders().cancel(id).await
    }

    pub async fn check_order(&self, id: &OrderId) -> TraderResult<CancelResult> {
        self.orders().check(id).await
    }

    pub async fn get_open_orders(&self) -> TraderResult<Vec<OrderInfo>> {
        self.orders().open().await
    }

    /// Issue `method` through the retry layer and map the body with `handle`.
    pub(crate) async fn call<R, H>(
        &self,
        method: &str,
        params: Params,
        kind: CallKind,
        handle: H,
    ) -> TraderResult<R>
    where
        H: FnOnce(Value) -> TraderResult<R>,
    {
        let transport = &self.transport;
        let params = &params;
        self.invoker
            .invoke(method, kind, move || transport.invoke(method, params), handle)
            .await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Configuration
// ═════════════════════════════════════════════════════════════════════════════

/// Account and market selection, as read from a config file or environment.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TraderConfig {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
    pub currency: String,
    pub asset: String,
}

impl TraderConfig {
    /// Read `BUZZEX_KEY`, `BUZZEX_SECRET`, `BUZZEX_CURRENCY` and `BUZZEX_ASSET`.
    pub fn from_env() -> TraderResult<Self> {
        let required = |name: &str| {
            std::env::var(name).map_err(|_| TraderError::Config(format!("{} is not set", name)))
        };
        Ok(Self {
            key: std::env::var("BUZZEX_KEY").ok(),
            secret: std::env::var("BUZZEX_SECRET").ok(),
            currency: required("BUZZEX_CURRENCY")?,
            asset: required("BUZZEX_ASSET")?,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.key.as_deref().is_some_and(|k| !k.is_empty())
            && self.secret.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl fmt::Debug for TraderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraderConfig")
            .field("key", &self.key)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("currency", &self.currency)
            .field("asset", &self.asset)
            .finish()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct TraderBuilder {
    currency: Option<String>,
    asset: Option<String>,
    catalog: Option<MarketCatalog>,
    retry: RetryConfig,
    signatures: ErrorSignatures,
}

impl TraderBuilder {
    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = Some(currency.to_string());
        self
    }

    pub fn asset(mut self, asset: &str) -> Self {
        self.asset = Some(asset.to_string());
        self
    }

    /// Take currency and asset from a [`TraderConfig`].
    pub fn config(self, config: &TraderConfig) -> Self {
        self.currency(&config.currency).asset(&config.asset)
    }

    /// Use a catalog other than the embedded Buzzex one.
    pub fn catalog(mut self, catalog: MarketCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn signatures(mut self, signatures: ErrorSignatures) -> Self {
        self.signatures = signatures;
        self
    }

    /// Bind to the configured market. Fails when currency or asset is
    /// missing, or when the catalog lists no such market.
    pub fn build<T: Transport>(self, transport: T) -> TraderResult<Trader<T>> {
        let currency = self
            .currency
            .ok_or_else(|| TraderError::Config("currency is required".into()))?;
        let asset = self
            .asset
            .ok_or_else(|| TraderError::Config("asset is required".into()))?;
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => MarketCatalog::buzzex()?,
        };
        let market = catalog.require(&currency, &asset)?;

        tracing::debug!(
            currency = %market.currency,
            asset = %market.asset,
            pair = %market.pair,
            "Bound Buzzex market"
        );

        Ok(Trader {
            transport,
            market,
            catalog: Arc::new(catalog),
            invoker: RetryInvoker::new(self.retry, self.signatures),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RawResponse;
    use async_trait::async_trait;
    use std::str::FromStr;

    struct Offline;

    #[async_trait]
    impl Transport for Offline {
        async fn invoke(&self, _method: &str, _params: &Params) -> RawResponse {
            Ok(None)
        }
    }

    fn trader() -> Trader<Offline> {
        Trader::builder()
            .currency("btc")
            .asset("eth")
            .build(Offline)
            .unwrap()
    }

    #[test]
    fn test_debug_shows_market_without_transport() {
        let dbg = format!("{:?}", trader());
        assert!(dbg.starts_with("Trader {"));
        assert!(dbg.contains("ETH_BTC"));
        assert!(dbg.ends_with(".. }"));
    }

    #[test]
    fn test_builder_binds_market() {
        let t = trader();
        assert_eq!(t.market().pair.as_str(), "ETH_BTC");
        assert_eq!(t.market().currency, "BTC");
    }

    #[test]
    fn test_builder_requires_currency() {
        let err = Trader::builder().asset("ETH").build(Offline).unwrap_err();
        assert!(matches!(err, TraderError::Config(_)));
    }

    #[test]
    fn test_builder_unknown_market() {
        let err = Trader::builder()
            .currency("EUR")
            .asset("ETH")
            .build(Offline)
            .unwrap_err();
        assert!(matches!(err, TraderError::UnknownMarket { .. }));
    }

    #[test]
    fn test_builder_from_config() {
        let config: TraderConfig = serde_json::from_value(serde_json::json!({
            "key": "k",
            "secret": "s",
            "currency": "usdt",
            "asset": "btc"
        }))
        .unwrap();
        assert!(config.has_credentials());
        let t = Trader::builder().config(&config).build(Offline).unwrap();
        assert_eq!(t.market().pair.as_str(), "BTC_USDT");
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let config = TraderConfig {
            key: Some("k".into()),
            secret: Some("hunter2".into()),
            currency: "BTC".into(),
            asset: "ETH".into(),
        };
        let dbg = format!("{:?}", config);
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn test_static_values() {
        let t = trader();
        assert_eq!(t.get_fee(), Decimal::from_str("0.0002").unwrap());
        assert_eq!(t.interval(), Duration::from_millis(3100));
        assert_eq!(t.capabilities().slug, "Buzzex");
    }

    #[test]
    fn test_round_through_market_precision() {
        let t = trader();
        let v = Decimal::from_str("0.123456789").unwrap();
        assert_eq!(t.round_amount(v), Decimal::from_str("0.12345678").unwrap());
        assert_eq!(t.round_price(v), Decimal::from_str("0.12345679").unwrap());
    }
}
