//! Market monitors.
//!
//! Polls candle and pool data, computes indicators (RSI, TD Sequential,
//! volume ratio, top pool APR) and pushes a notification whenever a value
//! crosses its configured threshold.

pub mod alert;
pub mod config;
mod error;
pub mod indicators;
pub mod monitors;
pub mod runner;
pub mod source;
mod types;

pub use alert::AlertGate;
pub use config::{ConfigFile, HttpConfig, LogConfig, MonitorConfig};
pub use error::ConfigError;
pub use monitors::{build_monitor, Monitor};
pub use runner::{MonitorRunner, Schedule};
pub use source::{CandleSource, Notifier, PoolSource, RetryPolicy, SilentNotifier};
pub use types::{Alert, MonitorKind, Side, TdDirection};
