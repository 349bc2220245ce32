use utils::Candle;

/// Bars compared against: `close[i]` vs `close[i - LOOKBACK]`.
pub const LOOKBACK: usize = 4;

/// Minimum window for a defined TD count.
pub const MIN_BARS: usize = LOOKBACK + 1;

/// Up/down run counts at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TdBar {
    pub up: u32,
    pub down: u32,
}

/// TD Sequential state at the last bar of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdCounts {
    /// Consecutive closes above the close four bars earlier
    pub up: u32,
    /// Consecutive closes below the close four bars earlier
    pub down: u32,
    /// Close of the last bar
    pub close: f64,
}

/// Up/down run counts for every bar in `closes`.
///
/// Bars before index 4 are zero. From index 4 on, each counter extends
/// its previous value by one when the comparison holds and resets to zero
/// otherwise; the two counters are independent.
pub fn td_sequential_series(closes: &[f64]) -> Vec<TdBar> {
    let mut down = vec![0_i64; closes.len()];
    let mut up = vec![0_i64; closes.len()];

    for i in LOOKBACK..closes.len() {
        if closes[i] < closes[i - LOOKBACK] {
            down[i] = if down[i - 1] >= 0 { down[i - 1] + 1 } else { 1 };
        } else {
            down[i] = 0;
        }
        if closes[i] > closes[i - LOOKBACK] {
            up[i] = if up[i - 1] >= 0 { up[i - 1] + 1 } else { 1 };
        } else {
            up[i] = 0;
        }
    }

    up.into_iter()
        .zip(down)
        .map(|(up, down)| TdBar {
            up: up as u32,
            down: down as u32,
        })
        .collect()
}

/// TD Sequential counts at the last candle, recomputed from the whole window.
///
/// Returns `None` for windows shorter than five bars.
pub fn td_sequential(candles: &[Candle]) -> Option<TdCounts> {
    if candles.len() < MIN_BARS {
        return None;
    }
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let last = *td_sequential_series(&closes).last()?;
    Some(TdCounts {
        up: last.up,
        down: last.down,
        close: *closes.last()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                open_time: i as i64 * 60_000,
                open: close,
                high: close,
                low: close,
                close,
                volume: 1.0,
            })
            .collect()
    }

    #[test]
    fn short_window_is_undefined() {
        assert!(td_sequential(&candles(&[1.0, 2.0, 3.0, 4.0])).is_none());
        assert!(td_sequential(&candles(&[1.0, 2.0, 3.0, 4.0, 5.0])).is_some());
    }

    #[test]
    fn first_four_bars_are_zero() {
        let series = td_sequential_series(&[5.0, 1.0, 9.0, 2.0, 8.0, 3.0]);
        for bar in &series[..4] {
            assert_eq!(*bar, TdBar::default());
        }
    }

    #[test]
    fn constant_rise_counts_from_bar_four() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + 2.0 * i as f64).collect();
        let series = td_sequential_series(&closes);
        for (i, bar) in series.iter().enumerate().skip(LOOKBACK) {
            assert_eq!(bar.up as usize, i - 3);
            assert_eq!(bar.down, 0);
        }
        assert_eq!(series[12].up, 9);
        assert_eq!(series[16].up, 13);
    }

    #[test]
    fn thirteen_bar_rise_ends_at_nine() {
        let closes: Vec<f64> = (0..13).map(|i| i as f64).collect();
        let counts = td_sequential(&candles(&closes)).unwrap();
        assert_eq!(counts.up, 9);
        assert_eq!(counts.down, 0);
        assert_eq!(counts.close, 12.0);
    }

    #[test]
    fn equal_close_resets_both_counters() {
        // bar 5 rises vs bar 1, bar 6 equals bar 2
        let series = td_sequential_series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 3.0]);
        assert_eq!(series[5].up, 2);
        assert_eq!(series[6], TdBar { up: 0, down: 0 });
    }

    #[test]
    fn decline_counts_down_and_resets_up() {
        let closes = [10.0, 10.0, 10.0, 10.0, 11.0, 12.0, 9.0, 8.0, 7.0, 6.0];
        let series = td_sequential_series(&closes);
        assert_eq!(series[5].up, 2);
        assert_eq!(series[6], TdBar { up: 0, down: 1 });
        assert_eq!(series[9], TdBar { up: 0, down: 4 });
    }

    #[test]
    fn counters_never_both_positive() {
        let closes = [
            5.0, 3.0, 8.0, 1.0, 9.0, 2.0, 7.0, 7.0, 4.0, 6.0, 10.0, 0.5, 3.0, 3.0, 8.0, 8.5,
        ];
        for bar in td_sequential_series(&closes) {
            assert!(!(bar.up > 0 && bar.down > 0), "{:?}", bar);
        }
    }

    #[test]
    fn recomputation_is_idempotent() {
        let window = candles(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0]);
        assert_eq!(td_sequential(&window), td_sequential(&window));
    }
}
