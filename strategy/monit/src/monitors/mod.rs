//! The four monitor variants.
//!
//! Each variant owns its indicator and alert rule and shares the
//! [`CandleSource`]/[`PoolSource`] capabilities; the runner only sees the
//! [`Monitor`] trait.

mod apr;
mod rsi;
mod td;
mod volume;

use async_trait::async_trait;
use clients_binance::{BinanceSpotClient, BinanceSpotClientConfig};
use clients_cetus::{CetusClient, CetusClientConfig};

use crate::config::{HttpConfig, MonitorConfig};
use crate::source::{BinanceCandles, CetusPools};
use crate::types::{Alert, MonitorKind};

pub use apr::AprMonitor;
pub use rsi::RsiMonitor;
pub use td::TdMonitor;
pub use volume::VolumeMonitor;

/// One monitor's fetch, compute and evaluate steps for a single target.
#[async_trait]
pub trait Monitor: Send + Sync {
    fn kind(&self) -> MonitorKind;

    /// Symbols (or pool sources) visited on each pass, in order.
    fn targets(&self) -> Vec<String>;

    /// Fetches data for `target`, computes the indicator and returns the
    /// alerts that fired. `None` when the target was skipped this round
    /// (absent data or a too-short window) and nothing was evaluated.
    async fn check(&self, target: &str) -> Option<Vec<Alert>>;

    /// Logs the effective parameters once at startup.
    fn log_parameters(&self);

    /// Message pushed once when the monitor starts.
    fn startup_notice(&self) -> Option<String> {
        None
    }
}

/// Builds the monitor selected by `config`, wired to the live HTTP clients.
pub fn build_monitor(
    config: &MonitorConfig,
    http: &HttpConfig,
    client: reqwest::Client,
) -> Box<dyn Monitor> {
    let retry = http.retry_policy();
    let candles = || {
        BinanceCandles::new(
            BinanceSpotClient::new(
                client.clone(),
                BinanceSpotClientConfig {
                    base_url: http.binance_url.clone(),
                },
            ),
            retry,
        )
    };
    match config {
        MonitorConfig::Apr(c) => {
            let pools = CetusPools::new(
                CetusClient::new(
                    client.clone(),
                    CetusClientConfig {
                        base_url: http.cetus_url.clone(),
                    },
                ),
                retry,
            );
            Box::new(AprMonitor::new(c.clone(), pools))
        }
        MonitorConfig::Rsi(c) => Box::new(RsiMonitor::new(c.clone(), candles())),
        MonitorConfig::Td(c) => Box::new(TdMonitor::new(c.clone(), candles())),
        MonitorConfig::Volume(c) => Box::new(VolumeMonitor::new(c.clone(), candles())),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory fakes of the capability traits.

    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use clients_cetus::PoolSnapshot;
    use utils::Candle;

    use crate::source::{CandleSource, Notifier, PoolSource};

    pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                open_time: 1_700_000_000_000 + i as i64 * 3_600_000,
                open: close,
                high: close,
                low: close,
                close,
                volume: 100.0,
            })
            .collect()
    }

    pub fn candles_from_volumes(volumes: &[f64]) -> Vec<Candle> {
        volumes
            .iter()
            .enumerate()
            .map(|(i, &volume)| Candle {
                open_time: 1_700_000_000_000 + i as i64 * 3_600_000,
                open: 1.0,
                high: 1.0,
                low: 1.0,
                close: 1.0,
                volume,
            })
            .collect()
    }

    /// Serves a fixed window per symbol; unknown symbols are absent.
    #[derive(Default)]
    pub struct FixedCandles {
        pub windows: HashMap<String, Vec<Candle>>,
        pub requests: Mutex<Vec<(String, String, u16)>>,
    }

    impl FixedCandles {
        pub fn with(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
            self.windows.insert(symbol.to_string(), candles);
            self
        }
    }

    #[async_trait]
    impl CandleSource for FixedCandles {
        async fn fetch_candles(
            &self,
            symbol: &str,
            interval: &str,
            limit: u16,
        ) -> Option<Vec<Candle>> {
            self.requests
                .lock()
                .unwrap()
                .push((symbol.to_string(), interval.to_string(), limit));
            self.windows.get(symbol).cloned()
        }
    }

    /// Plays back one response per fetch, whatever the symbol; absent
    /// once the script runs out.
    #[derive(Default)]
    pub struct ScriptedCandles {
        pub script: Mutex<VecDeque<Option<Vec<Candle>>>>,
    }

    impl ScriptedCandles {
        pub fn new(script: Vec<Option<Vec<Candle>>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
            }
        }
    }

    #[async_trait]
    impl CandleSource for ScriptedCandles {
        async fn fetch_candles(
            &self,
            _symbol: &str,
            _interval: &str,
            _limit: u16,
        ) -> Option<Vec<Candle>> {
            self.script.lock().unwrap().pop_front().flatten()
        }
    }

    pub struct FixedPools(pub Option<PoolSnapshot>);

    #[async_trait]
    impl PoolSource for FixedPools {
        async fn fetch_pool_snapshot(&self) -> Option<PoolSnapshot> {
            self.0.clone()
        }
    }

    /// Records every delivered message.
    #[derive(Clone, Default)]
    pub struct RecordingNotifier {
        pub sent: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingNotifier {
        pub fn messages(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, text: &str) {
            self.sent.lock().unwrap().push(text.to_string());
        }
    }
}
