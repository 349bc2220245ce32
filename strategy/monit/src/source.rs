//! Capabilities the monitors need from the outside world.
//!
//! Transport failures stop here: fetchers log and return `None` so the
//! caller skips the symbol for this round, and notifiers log and swallow
//! delivery errors.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use clients_binance::BinanceSpotClient;
use clients_cetus::{CetusClient, PoolSnapshot};
use clients_feishu::FeishuBot;
use tracing::{error, warn};
use utils::Candle;

/// Fetches candle windows, oldest first.
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn fetch_candles(&self, symbol: &str, interval: &str, limit: u16) -> Option<Vec<Candle>>;
}

/// Fetches liquidity pool statistics.
#[async_trait]
pub trait PoolSource: Send + Sync {
    async fn fetch_pool_snapshot(&self) -> Option<PoolSnapshot>;
}

/// Delivers alert text. Never fails from the caller's point of view.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str);
}

/// How many times a failed fetch is repeated within one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            retries: 0,
            backoff: Duration::ZERO,
        }
    }

    pub fn once(backoff: Duration) -> Self {
        Self {
            retries: 1,
            backoff,
        }
    }
}

/// Runs `fetch` until it succeeds or the policy is exhausted.
pub async fn fetch_with_retry<T, F, Fut>(policy: RetryPolicy, what: &str, mut fetch: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let mut attempt = 0;
    loop {
        match fetch().await {
            Ok(value) => return Some(value),
            Err(e) if attempt < policy.retries => {
                attempt += 1;
                warn!(what, attempt, error = %format!("{:#}", e), "fetch failed, retrying");
                tokio::time::sleep(policy.backoff).await;
            }
            Err(e) => {
                error!(what, error = %format!("{:#}", e), "fetch failed");
                return None;
            }
        }
    }
}

/// Binance spot klines as a [`CandleSource`].
pub struct BinanceCandles {
    client: BinanceSpotClient,
    retry: RetryPolicy,
}

impl BinanceCandles {
    pub fn new(client: BinanceSpotClient, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }
}

#[async_trait]
impl CandleSource for BinanceCandles {
    async fn fetch_candles(&self, symbol: &str, interval: &str, limit: u16) -> Option<Vec<Candle>> {
        let what = format!("klines {} {}", symbol, interval);
        let client = &self.client;
        fetch_with_retry(self.retry, &what, move || {
            client.get_klines(symbol, interval, limit)
        })
        .await
    }
}

/// Cetus pool statistics as a [`PoolSource`].
pub struct CetusPools {
    client: CetusClient,
    retry: RetryPolicy,
}

impl CetusPools {
    pub fn new(client: CetusClient, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }
}

#[async_trait]
impl PoolSource for CetusPools {
    async fn fetch_pool_snapshot(&self) -> Option<PoolSnapshot> {
        let client = &self.client;
        fetch_with_retry(self.retry, "statistics_pools", move || {
            client.get_statistics_pools()
        })
        .await
    }
}

#[async_trait]
impl Notifier for FeishuBot {
    async fn notify(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Err(e) = self.push_message(text).await {
            error!(error = %format!("{:#}", e), "feishu delivery failed");
        }
    }
}

/// Used when no notification destination is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

#[async_trait]
impl Notifier for SilentNotifier {
    async fn notify(&self, _text: &str) {}
}
