use async_trait::async_trait;
use tracing::{error, info};

use crate::alert::apr_alert;
use crate::config::AprConfig;
use crate::indicators::select_max_apr;
use crate::monitors::Monitor;
use crate::source::PoolSource;
use crate::types::{Alert, MonitorKind};

/// The single target polled by the APR monitor.
const TARGET: &str = "cetus";

/// Reports the highest-APR Cetus pool with an active mining reward.
pub struct AprMonitor<P> {
    config: AprConfig,
    source: P,
}

impl<P: PoolSource> AprMonitor<P> {
    pub fn new(config: AprConfig, source: P) -> Self {
        Self { config, source }
    }
}

#[async_trait]
impl<P: PoolSource> Monitor for AprMonitor<P> {
    fn kind(&self) -> MonitorKind {
        MonitorKind::Apr
    }

    fn targets(&self) -> Vec<String> {
        vec![TARGET.to_string()]
    }

    async fn check(&self, _target: &str) -> Option<Vec<Alert>> {
        let Some(snapshot) = self.source.fetch_pool_snapshot().await else {
            return None;
        };
        let Some(pick) = select_max_apr(&snapshot) else {
            error!(pools = snapshot.pools.len(), "failed to find max APR pool");
            return Some(Vec::new());
        };
        info!(symbol = %pick.symbol, apr = pick.display_apr, "top Cetus APR pool");

        let alert = apr_alert(&pick, self.config.min_apr);
        if alert.is_none() {
            info!(min_apr = self.config.min_apr, "APR not above minimum, skipping");
        }
        Some(alert.into_iter().collect())
    }

    fn log_parameters(&self) {
        info!(
            t = ?self.config.t,
            slp = ?self.config.slp,
            min_apr = self.config.min_apr,
            "startup parameters"
        );
    }

    fn startup_notice(&self) -> Option<String> {
        Some("[system] Cetus top APR monitor started".to_string())
    }
}
