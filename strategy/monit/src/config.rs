//! Configuration types for the monitors.
//!
//! One TOML file holds a section per monitor (`[Cetus]`, `[RSI]`, `[TD9]`,
//! `[VOL]`) plus optional `[http]` and `[log]` tables. Only the section of
//! the monitor being started has to be present; it is validated before the
//! monitor is built.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::runner::Schedule;
use crate::source::RetryPolicy;
use crate::types::{MonitorKind, Side};

/// Candles fetched per symbol and poll.
pub const CANDLE_LIMIT: u16 = 30;

/// Whole config file as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(rename = "Cetus", default)]
    pub cetus: Option<AprConfig>,
    #[serde(rename = "RSI", default)]
    pub rsi: Option<RsiConfig>,
    #[serde(rename = "TD9", default)]
    pub td: Option<TdConfig>,
    #[serde(rename = "VOL", default)]
    pub vol: Option<VolumeConfig>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Top-APR pool monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AprConfig {
    /// Feishu webhook; notifications are disabled when absent
    #[serde(default)]
    pub feishu: Option<String>,
    /// Alert only when the top APR (percent) is strictly above this
    pub min_apr: f64,
    /// Daily local run time, "HH:MM"
    #[serde(default)]
    pub t: Option<String>,
    /// Polling interval in seconds, used when `t` is absent
    #[serde(default)]
    pub slp: Option<u64>,
    #[serde(default)]
    pub edge_triggered: bool,
}

/// RSI monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiConfig {
    /// Symbols to watch, e.g. ["BTCUSDT", "ETHUSDT"]
    pub symbols: Vec<String>,
    /// Candle interval, e.g. "4h"
    pub interval: String,
    #[serde(default)]
    pub feishu: Option<String>,
    /// Seconds between passes over `symbols`
    pub slp: u64,
    /// Overbought threshold
    pub up: f64,
    /// Oversold threshold
    pub down: f64,
    /// RSI period
    pub n: usize,
    #[serde(default)]
    pub edge_triggered: bool,
}

/// TD Sequential monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdConfig {
    pub symbols: Vec<String>,
    pub interval: String,
    #[serde(default)]
    pub feishu: Option<String>,
    pub slp: u64,
    /// Which run directions may alert
    #[serde(default)]
    pub side: Side,
    /// Seconds to wait between symbols within a pass
    #[serde(default = "default_symbol_delay")]
    pub symbol_delay: u64,
    #[serde(default)]
    pub edge_triggered: bool,
}

/// Volume spike monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeConfig {
    pub symbols: Vec<String>,
    pub interval: String,
    #[serde(default)]
    pub feishu: Option<String>,
    pub slp: u64,
    /// Alert when volume reaches `x` times the previous moving average
    pub x: f64,
    /// Moving average window
    pub n: usize,
    #[serde(default)]
    pub edge_triggered: bool,
}

/// Outbound HTTP settings shared by all clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Retry a failed fetch once within the same poll
    pub retry: bool,
    pub retry_backoff_ms: u64,
    pub binance_url: String,
    pub cetus_url: String,
}

/// Logging destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Also append log lines to this file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_symbol_delay() -> u64 {
    3
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            retry: true,
            retry_backoff_ms: 500,
            binance_url: clients_binance::BinanceSpotClientConfig::default().base_url,
            cetus_url: clients_cetus::CetusClientConfig::default().base_url,
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("http.timeout_secs", "must be > 0"));
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        if self.retry {
            RetryPolicy::once(Duration::from_millis(self.retry_backoff_ms))
        } else {
            RetryPolicy::none()
        }
    }

    /// Builds the process-wide HTTP client with the configured timeout.
    pub fn build_client(&self) -> anyhow::Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?)
    }
}

/// Validated settings of the monitor selected at startup.
#[derive(Debug, Clone)]
pub enum MonitorConfig {
    Apr(AprConfig),
    Rsi(RsiConfig),
    Td(TdConfig),
    Volume(VolumeConfig),
}

impl MonitorConfig {
    pub fn kind(&self) -> MonitorKind {
        match self {
            MonitorConfig::Apr(_) => MonitorKind::Apr,
            MonitorConfig::Rsi(_) => MonitorKind::Rsi,
            MonitorConfig::Td(_) => MonitorKind::Td,
            MonitorConfig::Volume(_) => MonitorKind::Volume,
        }
    }

    /// Notification webhook, with empty strings treated as absent.
    pub fn feishu(&self) -> Option<&str> {
        let feishu = match self {
            MonitorConfig::Apr(c) => c.feishu.as_deref(),
            MonitorConfig::Rsi(c) => c.feishu.as_deref(),
            MonitorConfig::Td(c) => c.feishu.as_deref(),
            MonitorConfig::Volume(c) => c.feishu.as_deref(),
        };
        feishu.map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn edge_triggered(&self) -> bool {
        match self {
            MonitorConfig::Apr(c) => c.edge_triggered,
            MonitorConfig::Rsi(c) => c.edge_triggered,
            MonitorConfig::Td(c) => c.edge_triggered,
            MonitorConfig::Volume(c) => c.edge_triggered,
        }
    }

    pub fn schedule(&self) -> Result<Schedule, ConfigError> {
        match self {
            MonitorConfig::Apr(c) => c.schedule(),
            MonitorConfig::Rsi(c) => Ok(Schedule::every_secs(c.slp)),
            MonitorConfig::Td(c) => Ok(Schedule::every_secs(c.slp)),
            MonitorConfig::Volume(c) => Ok(Schedule::every_secs(c.slp)),
        }
    }

    /// Pause between symbols within one pass.
    pub fn symbol_delay(&self) -> Duration {
        match self {
            MonitorConfig::Td(c) => Duration::from_secs(c.symbol_delay),
            _ => Duration::ZERO,
        }
    }

    /// Startup self-check. Missing webhooks only warn.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            MonitorConfig::Apr(c) => c.validate()?,
            MonitorConfig::Rsi(c) => c.validate()?,
            MonitorConfig::Td(c) => c.validate()?,
            MonitorConfig::Volume(c) => c.validate()?,
        }
        if self.feishu().is_none() {
            warn!(monitor = %self.kind(), "feishu is missing, notifications disabled");
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> String {
        let value = match self {
            MonitorConfig::Apr(c) => serde_json::to_string_pretty(c),
            MonitorConfig::Rsi(c) => serde_json::to_string_pretty(c),
            MonitorConfig::Td(c) => serde_json::to_string_pretty(c),
            MonitorConfig::Volume(c) => serde_json::to_string_pretty(c),
        };
        value.unwrap_or_default()
    }
}

impl AprConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_apr.is_finite() || self.min_apr < 0.0 {
            return Err(ConfigError::invalid("min_apr", "must be >= 0"));
        }
        self.schedule().map(|_| ())
    }

    fn schedule(&self) -> Result<Schedule, ConfigError> {
        match (&self.t, self.slp) {
            (Some(t), _) => NaiveTime::parse_from_str(t.trim(), "%H:%M")
                .map(Schedule::DailyAt)
                .map_err(|e| {
                    ConfigError::invalid("t", format!("expected HH:MM, got {:?}: {}", t, e))
                }),
            (None, Some(slp)) if slp > 0 => Ok(Schedule::every_secs(slp)),
            (None, Some(_)) => Err(ConfigError::invalid("slp", "must be > 0")),
            (None, None) => Err(ConfigError::invalid("t", "one of `t` or `slp` is required")),
        }
    }
}

impl RsiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_symbols(&self.symbols, &self.interval, self.slp)?;
        if self.n < 2 {
            return Err(ConfigError::invalid("n", "must be >= 2"));
        }
        if usize::from(CANDLE_LIMIT) <= self.n {
            return Err(ConfigError::invalid(
                "n",
                format!("must be < {} (candles per fetch)", CANDLE_LIMIT),
            ));
        }
        if !(self.down > 0.0 && self.down < self.up && self.up <= 100.0) {
            return Err(ConfigError::invalid("up/down", "need 0 < down < up <= 100"));
        }
        Ok(())
    }
}

impl TdConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_symbols(&self.symbols, &self.interval, self.slp)
    }
}

impl VolumeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_symbols(&self.symbols, &self.interval, self.slp)?;
        if !(self.x.is_finite() && self.x > 1.0) {
            return Err(ConfigError::invalid("x", "must be > 1"));
        }
        if self.n == 0 || usize::from(CANDLE_LIMIT) <= self.n {
            return Err(ConfigError::invalid(
                "n",
                format!("must be between 1 and {}", CANDLE_LIMIT - 1),
            ));
        }
        Ok(())
    }
}

fn validate_symbols(symbols: &[String], interval: &str, slp: u64) -> Result<(), ConfigError> {
    if symbols.is_empty() || symbols.iter().any(|s| s.trim().is_empty()) {
        return Err(ConfigError::invalid("symbols", "must list at least one symbol"));
    }
    if interval.trim().is_empty() {
        return Err(ConfigError::invalid("interval", "must not be empty"));
    }
    if slp == 0 {
        return Err(ConfigError::invalid("slp", "must be > 0"));
    }
    Ok(())
}

impl ConfigFile {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Extracts and validates the section for `kind`.
    pub fn monitor(&self, kind: MonitorKind) -> Result<MonitorConfig, ConfigError> {
        let missing = || ConfigError::MissingSection(kind.section());
        let config = match kind {
            MonitorKind::Apr => MonitorConfig::Apr(self.cetus.clone().ok_or_else(missing)?),
            MonitorKind::Rsi => MonitorConfig::Rsi(self.rsi.clone().ok_or_else(missing)?),
            MonitorKind::Td => MonitorConfig::Td(self.td.clone().ok_or_else(missing)?),
            MonitorKind::Volume => MonitorConfig::Volume(self.vol.clone().ok_or_else(missing)?),
        };
        config.validate()?;
        self.http.validate()?;
        Ok(config)
    }
}
