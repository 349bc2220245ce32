//! Shared types for the monitors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of monitor variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorKind {
    Apr,
    Rsi,
    Td,
    Volume,
}

impl MonitorKind {
    /// Name of the config file section holding this monitor's settings.
    pub fn section(&self) -> &'static str {
        match self {
            MonitorKind::Apr => "Cetus",
            MonitorKind::Rsi => "RSI",
            MonitorKind::Td => "TD9",
            MonitorKind::Volume => "VOL",
        }
    }
}

impl fmt::Display for MonitorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonitorKind::Apr => "apr",
            MonitorKind::Rsi => "rsi",
            MonitorKind::Td => "td",
            MonitorKind::Volume => "vol",
        };
        f.write_str(name)
    }
}

impl FromStr for MonitorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "apr" | "cetus" => Ok(MonitorKind::Apr),
            "rsi" => Ok(MonitorKind::Rsi),
            "td" | "td9" => Ok(MonitorKind::Td),
            "vol" | "volume" => Ok(MonitorKind::Volume),
            other => Err(format!(
                "unknown monitor {:?}, expected one of apr, rsi, td, vol",
                other
            )),
        }
    }
}

/// Direction of a TD Sequential run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TdDirection {
    Up,
    Down,
}

/// Which TD Sequential directions may produce an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    All,
    Up,
    Down,
}

impl Side {
    pub fn allows(&self, direction: TdDirection) -> bool {
        match self {
            Side::All => true,
            Side::Up => direction == TdDirection::Up,
            Side::Down => direction == TdDirection::Down,
        }
    }
}

/// A single outbound message produced by an alert rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// Symbol (or pool) the alert refers to
    pub symbol: String,
    /// Indicator name, e.g. "RSI"
    pub indicator: &'static str,
    /// Which condition fired, e.g. "overbought" or "up 9"
    pub signal: String,
    /// Computed indicator value
    pub value: f64,
    /// Threshold that was crossed
    pub threshold: f64,
    /// Message body handed to the notifier
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("cetus".parse::<MonitorKind>().unwrap(), MonitorKind::Apr);
        assert_eq!("TD9".parse::<MonitorKind>().unwrap(), MonitorKind::Td);
        assert_eq!("volume".parse::<MonitorKind>().unwrap(), MonitorKind::Volume);
        assert!("macd".parse::<MonitorKind>().is_err());
    }

    #[test]
    fn side_filter() {
        assert!(Side::All.allows(TdDirection::Up));
        assert!(Side::All.allows(TdDirection::Down));
        assert!(Side::Up.allows(TdDirection::Up));
        assert!(!Side::Up.allows(TdDirection::Down));
        assert!(!Side::Down.allows(TdDirection::Up));
    }
}
