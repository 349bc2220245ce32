//! Shared utilities for the monit workspace.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// One OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time in milliseconds since Unix epoch
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Rounds `value` to `decimals` decimal places.
///
/// Ties round away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Current local time formatted as `YYYY-mm-dd HH:MM:SS`.
pub fn local_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_four_places() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(0.1, 4), 0.1);
        assert_eq!(round_to(2.0, 2), 2.0);
    }

    #[test]
    fn local_timestamp_shape() {
        let ts = local_timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }
}
