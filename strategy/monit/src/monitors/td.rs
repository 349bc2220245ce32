use async_trait::async_trait;
use tracing::info;

use crate::alert::td_alerts;
use crate::config::{TdConfig, CANDLE_LIMIT};
use crate::indicators::td_sequential;
use crate::monitors::Monitor;
use crate::source::CandleSource;
use crate::types::{Alert, MonitorKind};

/// TD Sequential 9/13 run alerts.
pub struct TdMonitor<S> {
    config: TdConfig,
    source: S,
}

impl<S: CandleSource> TdMonitor<S> {
    pub fn new(config: TdConfig, source: S) -> Self {
        Self { config, source }
    }
}

#[async_trait]
impl<S: CandleSource> Monitor for TdMonitor<S> {
    fn kind(&self) -> MonitorKind {
        MonitorKind::Td
    }

    fn targets(&self) -> Vec<String> {
        self.config.symbols.clone()
    }

    async fn check(&self, symbol: &str) -> Option<Vec<Alert>> {
        let interval = &self.config.interval;
        let Some(candles) = self
            .source
            .fetch_candles(symbol, interval, CANDLE_LIMIT)
            .await
        else {
            return None;
        };

        // counts are rebuilt from the fetched window on every poll
        let Some(counts) = td_sequential(&candles) else {
            info!(symbol, bars = candles.len(), "not enough candles for TD Sequential");
            return None;
        };
        if counts.up > 0 {
            info!(symbol, interval = %interval, price = counts.close, up = counts.up, "TD");
        }
        if counts.down > 0 {
            info!(symbol, interval = %interval, price = counts.close, down = counts.down, "TD");
        }

        let alerts = td_alerts(symbol, interval, &counts, self.config.side);
        for alert in &alerts {
            info!("{}", alert.text);
        }
        Some(alerts)
    }

    fn log_parameters(&self) {
        for symbol in &self.config.symbols {
            info!(symbol = %symbol, "starting TD monitor on binance");
        }
        info!(interval = %self.config.interval, "candle interval");
        info!(
            slp = self.config.slp,
            symbol_delay = self.config.symbol_delay,
            "polling interval (s)"
        );
        info!(side = ?self.config.side, "alert side");
    }
}
