//! Threshold rules and the optional edge-trigger gate.
//!
//! Rules are pure: indicator output and thresholds in, zero or more alerts
//! out. They fire on every qualifying evaluation; repeated alerts are only
//! suppressed when an [`AlertGate`] in edge mode sits in front of the
//! notifier.

use std::collections::{HashMap, HashSet};

use utils::round_to;

use crate::indicators::{AprPick, TdCounts, VolumeRatio};
use crate::types::{Alert, Side, TdDirection};

/// TD run lengths that produce an alert.
pub const TD_ALERT_COUNTS: [u32; 2] = [9, 13];

/// Alerts when the top pool's APR is strictly above `min_apr` (percent).
pub fn apr_alert(pick: &AprPick, min_apr: f64) -> Option<Alert> {
    if pick.display_apr <= min_apr {
        return None;
    }
    Some(Alert {
        symbol: pick.symbol.clone(),
        indicator: "APR",
        signal: "top apr".to_string(),
        value: pick.display_apr,
        threshold: min_apr,
        text: format!(
            "Cetus top APR pool: {} 24h APR: {:.2}%",
            pick.symbol, pick.display_apr
        ),
    })
}

/// Overbought when `rsi >= up`, oversold when `rsi <= down`; checked independently.
pub fn rsi_alerts(
    symbol: &str,
    interval: &str,
    period: usize,
    rsi: f64,
    up: f64,
    down: f64,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if rsi >= up {
        alerts.push(Alert {
            symbol: symbol.to_string(),
            indicator: "RSI",
            signal: "overbought".to_string(),
            value: rsi,
            threshold: up,
            text: format!(
                "{} {} RSI({}): {:.2} => overbought => consider short",
                symbol, interval, period, rsi
            ),
        });
    }
    if rsi <= down {
        alerts.push(Alert {
            symbol: symbol.to_string(),
            indicator: "RSI",
            signal: "oversold".to_string(),
            value: rsi,
            threshold: down,
            text: format!(
                "{} {} RSI({}): {:.2} => oversold => consider long",
                symbol, interval, period, rsi
            ),
        });
    }
    alerts
}

/// Alerts when a run reaches exactly 9 or 13 on a side permitted by `side`.
pub fn td_alerts(symbol: &str, interval: &str, counts: &TdCounts, side: Side) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if TD_ALERT_COUNTS.contains(&counts.up) && side.allows(TdDirection::Up) {
        alerts.push(Alert {
            symbol: symbol.to_string(),
            indicator: "TD",
            signal: format!("up {}", counts.up),
            value: counts.up as f64,
            threshold: counts.up as f64,
            text: format!(
                "[TD] {} {} price:{} TD up={} => sell",
                symbol, interval, counts.close, counts.up
            ),
        });
    }
    if TD_ALERT_COUNTS.contains(&counts.down) && side.allows(TdDirection::Down) {
        alerts.push(Alert {
            symbol: symbol.to_string(),
            indicator: "TD",
            signal: format!("down {}", counts.down),
            value: counts.down as f64,
            threshold: counts.down as f64,
            text: format!(
                "[TD] {} {} price:{} TD down={} => buy",
                symbol, interval, counts.close, counts.down
            ),
        });
    }
    alerts
}

/// Alerts when the volume ratio reaches the multiplier `x`.
pub fn volume_alert(
    symbol: &str,
    interval: &str,
    n: usize,
    vr: &VolumeRatio,
    x: f64,
) -> Option<Alert> {
    // NaN ratios fail the comparison and stay silent
    (vr.ratio >= x).then(|| Alert {
        symbol: symbol.to_string(),
        indicator: "VOL",
        signal: "volume spike".to_string(),
        value: vr.ratio,
        threshold: x,
        text: volume_summary(symbol, interval, n, vr),
    })
}

/// One-line description of a volume ratio, used for both the log and the alert.
pub fn volume_summary(symbol: &str, interval: &str, n: usize, vr: &VolumeRatio) -> String {
    format!(
        "{} {} volume:{} avg volume:{} window:{} ratio:{}x",
        symbol,
        interval,
        vr.volume,
        vr.vol_ma,
        n,
        round_to(vr.ratio, 2)
    )
}

/// Decides which alerts reach the notifier.
///
/// Level mode passes everything, so a condition that holds across polls
/// alerts on every poll. Edge mode remembers, per target, the signals that
/// fired on the previous evaluation and drops a signal that is still
/// firing; an evaluation without that signal re-arms it.
#[derive(Debug, Default)]
pub struct AlertGate {
    edge_triggered: bool,
    last_alert_state: HashMap<String, HashSet<String>>,
}

impl AlertGate {
    pub fn level() -> Self {
        Self::default()
    }

    pub fn edge() -> Self {
        Self {
            edge_triggered: true,
            last_alert_state: HashMap::new(),
        }
    }

    pub fn new(edge_triggered: bool) -> Self {
        if edge_triggered {
            Self::edge()
        } else {
            Self::level()
        }
    }

    pub fn is_edge_triggered(&self) -> bool {
        self.edge_triggered
    }

    /// Filters one evaluation's alerts for `target`.
    pub fn admit(&mut self, target: &str, alerts: Vec<Alert>) -> Vec<Alert> {
        if !self.edge_triggered {
            return alerts;
        }
        let current: HashSet<String> = alerts.iter().map(|a| a.signal.clone()).collect();
        let previous = self
            .last_alert_state
            .insert(target.to_string(), current)
            .unwrap_or_default();
        alerts
            .into_iter()
            .filter(|a| !previous.contains(&a.signal))
            .collect()
    }
}
