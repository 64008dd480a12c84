//! Read-only checks against the live Buzzex API.
//!
//! All tests are `#[ignore]` because they require network access. Market
//! selection comes from the environment (a `.env` file works):
//!
//! ```bash
//! BUZZEX_CURRENCY=BTC BUZZEX_ASSET=ETH cargo test --test live_buzzex -- --ignored
//! ```

#![cfg(feature = "http")]

use std::time::Duration;

use buzzex_trader::prelude::*;
use tokio::time::timeout;

const TEST_TIMEOUT: Duration = Duration::from_secs(30);

fn live_trader() -> Trader<HttpTransport> {
    dotenvy::dotenv().ok();
    let config = TraderConfig::from_env().unwrap_or_else(|_| TraderConfig {
        currency: "BTC".into(),
        asset: "ETH".into(),
        ..Default::default()
    });
    let base_url = std::env::var("BUZZEX_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

    Trader::builder()
        .config(&config)
        .retry_config(RetryConfig::default().with_max_retries(2))
        .build(HttpTransport::new(&base_url).expect("http client should build"))
        .expect("market should exist in the catalog")
}

#[tokio::test]
#[ignore]
async fn live_ticker_has_sane_spread() {
    let trader = live_trader();
    let ticker = timeout(TEST_TIMEOUT, trader.get_ticker())
        .await
        .expect("timed out")
        .expect("ticker should load");
    assert!(ticker.bid > rust_decimal::Decimal::ZERO);
    assert!(ticker.ask >= ticker.bid, "crossed book: {ticker:?}");
}

#[tokio::test]
#[ignore]
async fn live_trades_are_descending() {
    let trader = live_trader();
    let trades = timeout(TEST_TIMEOUT, trader.get_trades(None, true))
        .await
        .expect("timed out")
        .expect("trades should load");
    for pair in trades.windows(2) {
        assert!(pair[0].occurred_at >= pair[1].occurred_at);
    }
}
