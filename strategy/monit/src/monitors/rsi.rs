use async_trait::async_trait;
use tracing::info;

use crate::alert::rsi_alerts;
use crate::config::{RsiConfig, CANDLE_LIMIT};
use crate::indicators::rsi;
use crate::monitors::Monitor;
use crate::source::CandleSource;
use crate::types::{Alert, MonitorKind};

/// Overbought/oversold alerts from RSI over the last candles.
pub struct RsiMonitor<S> {
    config: RsiConfig,
    source: S,
}

impl<S: CandleSource> RsiMonitor<S> {
    pub fn new(config: RsiConfig, source: S) -> Self {
        Self { config, source }
    }
}

#[async_trait]
impl<S: CandleSource> Monitor for RsiMonitor<S> {
    fn kind(&self) -> MonitorKind {
        MonitorKind::Rsi
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

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let Some(value) = rsi(&closes, self.config.n) else {
            info!(
                symbol,
                bars = closes.len(),
                period = self.config.n,
                "not enough candles for RSI"
            );
            return None;
        };
        info!(symbol, interval = %interval, rsi = value, "last RSI");

        let alerts = rsi_alerts(
            symbol,
            interval,
            self.config.n,
            value,
            self.config.up,
            self.config.down,
        );
        for alert in &alerts {
            info!("{}", alert.text);
        }
        Some(alerts)
    }

    fn log_parameters(&self) {
        info!(symbols = ?self.config.symbols, "target symbols");
        info!(interval = %self.config.interval, "candle interval");
        info!(n = self.config.n, up = self.config.up, down = self.config.down, "RSI parameters");
        info!(slp = self.config.slp, "polling interval (s)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitors::testing::{candles_from_closes, FixedCandles};

    fn config() -> RsiConfig {
        RsiConfig {
            symbols: vec!["UPUSDT".into(), "DOWNUSDT".into()],
            interval: "4h".into(),
            feishu: None,
            slp: 60,
            up: 90.0,
            down: 10.0,
            n: 6,
            edge_triggered: false,
        }
    }

    fn source() -> FixedCandles {
        let rising: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
        let falling: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        FixedCandles::default()
            .with("UPUSDT", candles_from_closes(&rising))
            .with("DOWNUSDT", candles_from_closes(&falling))
            .with("SHORTUSDT", candles_from_closes(&[1.0, 2.0, 3.0]))
    }

    #[tokio::test]
    async fn rising_series_is_overbought() {
        let monitor = RsiMonitor::new(config(), source());
        let alerts = monitor.check("UPUSDT").await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].signal, "overbought");
        assert!(alerts[0].text.starts_with("UPUSDT 4h RSI(6): 100.00"));
    }

    #[tokio::test]
    async fn falling_series_is_oversold() {
        let monitor = RsiMonitor::new(config(), source());
        let alerts = monitor.check("DOWNUSDT").await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].signal, "oversold");
    }

    #[tokio::test]
    async fn requests_thirty_bars_at_configured_interval() {
        let monitor = RsiMonitor::new(config(), source());
        monitor.check("UPUSDT").await;
        let requests = monitor.source.requests.lock().unwrap().clone();
        assert_eq!(requests, vec![("UPUSDT".to_string(), "4h".to_string(), 30)]);
    }

    #[tokio::test]
    async fn absent_or_short_data_is_skipped() {
        let monitor = RsiMonitor::new(config(), source());
        assert!(monitor.check("MISSINGUSDT").await.is_none());
        assert!(monitor.check("SHORTUSDT").await.is_none());
    }
}
