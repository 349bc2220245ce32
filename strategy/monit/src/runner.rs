//! Polling loop shared by all monitors.
//!
//! `start` performs the one-off startup work; each pass then visits the
//! monitor's targets in order, strictly sequentially, and hands whatever
//! alerts survive the gate to the notifier before moving on.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta};
use tracing::{debug, info};

use crate::alert::AlertGate;
use crate::monitors::Monitor;
use crate::source::Notifier;

/// When passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Run immediately, then sleep this long after every pass
    Every(Duration),
    /// Run once a day at this local time
    DailyAt(NaiveTime),
}

impl Schedule {
    pub fn every_secs(secs: u64) -> Self {
        Schedule::Every(Duration::from_secs(secs))
    }

    /// Wait before starting a pass at local time `now`.
    pub fn delay_before_pass(&self, now: NaiveDateTime) -> Duration {
        match self {
            Schedule::Every(_) => Duration::ZERO,
            Schedule::DailyAt(at) => {
                let mut next = now.date().and_time(*at);
                if next <= now {
                    next += TimeDelta::days(1);
                }
                (next - now).to_std().unwrap_or_default()
            }
        }
    }

    /// Wait after a pass completes.
    pub fn delay_after_pass(&self) -> Duration {
        match self {
            Schedule::Every(every) => *every,
            Schedule::DailyAt(_) => Duration::ZERO,
        }
    }
}

/// Drives one monitor forever.
pub struct MonitorRunner {
    monitor: Box<dyn Monitor>,
    notifier: Box<dyn Notifier>,
    schedule: Schedule,
    symbol_delay: Duration,
    gate: AlertGate,
}

impl MonitorRunner {
    pub fn new(monitor: Box<dyn Monitor>, notifier: Box<dyn Notifier>, schedule: Schedule) -> Self {
        Self {
            monitor,
            notifier,
            schedule,
            symbol_delay: Duration::ZERO,
            gate: AlertGate::level(),
        }
    }

    /// Pause between consecutive targets within a pass.
    pub fn with_symbol_delay(mut self, delay: Duration) -> Self {
        self.symbol_delay = delay;
        self
    }

    pub fn with_gate(mut self, gate: AlertGate) -> Self {
        self.gate = gate;
        self
    }

    /// Startup: logs parameters and pushes the monitor's startup notice.
    pub async fn start(&self) {
        info!(monitor = %self.monitor.kind(), schedule = ?self.schedule, "self-check complete");
        self.monitor.log_parameters();
        if self.gate.is_edge_triggered() {
            info!("edge-triggered alerts: repeats are suppressed until the condition clears");
        }
        if let Some(notice) = self.monitor.startup_notice() {
            self.notifier.notify(&notice).await;
        }
    }

    /// One pass over every target. Returns the number of notifications sent.
    pub async fn run_pass(&mut self) -> usize {
        let targets = self.monitor.targets();
        let mut sent = 0;
        for (i, target) in targets.iter().enumerate() {
            if i > 0 && !self.symbol_delay.is_zero() {
                tokio::time::sleep(self.symbol_delay).await;
            }
            // a skipped target leaves the gate as it was
            let Some(alerts) = self.monitor.check(target).await else {
                continue;
            };
            for alert in self.gate.admit(target, alerts) {
                debug!(
                    symbol = %alert.symbol,
                    indicator = alert.indicator,
                    signal = %alert.signal,
                    "notify"
                );
                self.notifier.notify(&alert.text).await;
                sent += 1;
            }
        }
        sent
    }

    /// Runs `start` and then passes until the process is terminated.
    pub async fn run(mut self) {
        self.start().await;
        loop {
            let wait = self.schedule.delay_before_pass(Local::now().naive_local());
            if !wait.is_zero() {
                info!(secs = wait.as_secs(), "waiting for next scheduled run");
                tokio::time::sleep(wait).await;
            }
            let sent = self.run_pass().await;
            debug!(sent, "pass complete");
            tokio::time::sleep(self.schedule.delay_after_pass()).await;
        }
    }
}
