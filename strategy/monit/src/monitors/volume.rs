use async_trait::async_trait;
use tracing::info;

use crate::alert::{volume_alert, volume_summary};
use crate::config::{VolumeConfig, CANDLE_LIMIT};
use crate::indicators::volume_ratio;
use crate::monitors::Monitor;
use crate::source::CandleSource;
use crate::types::{Alert, MonitorKind};

/// Volume spike alerts: last bar's volume against the trailing average.
pub struct VolumeMonitor<S> {
    config: VolumeConfig,
    source: S,
}

impl<S: CandleSource> VolumeMonitor<S> {
    pub fn new(config: VolumeConfig, source: S) -> Self {
        Self { config, source }
    }
}

#[async_trait]
impl<S: CandleSource> Monitor for VolumeMonitor<S> {
    fn kind(&self) -> MonitorKind {
        MonitorKind::Volume
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

        let Some(vr) = volume_ratio(&candles, self.config.n) else {
            info!(
                symbol,
                bars = candles.len(),
                window = self.config.n,
                "not enough candles for volume ratio"
            );
            return None;
        };
        info!("{}", volume_summary(symbol, interval, self.config.n, &vr));

        let alert = volume_alert(symbol, interval, self.config.n, &vr, self.config.x);
        Some(alert.into_iter().collect())
    }

    fn log_parameters(&self) {
        info!(symbols = ?self.config.symbols, "target symbols");
        info!(interval = %self.config.interval, "candle interval");
        info!(x = self.config.x, "volume multiplier threshold");
        info!(n = self.config.n, "moving average window");
        info!(slp = self.config.slp, "polling interval (s)");
    }
}
