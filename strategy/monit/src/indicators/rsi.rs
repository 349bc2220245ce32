/// RSI over `closes`, evaluated at the last bar.
///
/// Seeds the average gain/loss with the simple mean of the first `period`
/// changes, then applies Wilder smoothing (factor `1/period`) to the rest.
/// Matches TA-Lib `RSI` with no unstable period: a zero average loss gives
/// 100, and a window with neither gains nor losses gives 0.
///
/// Returns `None` unless `closes.len() > period` and `period > 0`.
pub fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() <= period {
        return None;
    }

    let w = period as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for pair in closes[..=period].windows(2) {
        let change = pair[1] - pair[0];
        if change < 0.0 {
            avg_loss -= change;
        } else {
            avg_gain += change;
        }
    }
    avg_gain /= w;
    avg_loss /= w;

    for pair in closes[period..].windows(2) {
        let change = pair[1] - pair[0];
        let (gain, loss) = if change < 0.0 {
            (0.0, -change)
        } else {
            (change, 0.0)
        };
        avg_gain = (avg_gain * (w - 1.0) + gain) / w;
        avg_loss = (avg_loss * (w - 1.0) + loss) / w;
    }

    let total = avg_gain + avg_loss;
    if total == 0.0 {
        Some(0.0)
    } else {
        Some(100.0 * avg_gain / total)
    }
}

#[cfg(test)]
mod tests {
    use super::rsi;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn too_short_window_is_undefined() {
        assert_eq!(rsi(&[1.0, 2.0, 3.0], 3), None);
        assert_eq!(rsi(&[], 6), None);
        assert_eq!(rsi(&[1.0, 2.0], 0), None);
    }

    #[test]
    fn minimum_window_uses_seed_average_only() {
        // changes: +1, -1, +2 -> gain 3/3, loss 1/3 -> 100 * 1 / (4/3) = 75
        let v = rsi(&[10.0, 11.0, 10.0, 12.0], 3).unwrap();
        assert!(approx(v, 75.0));
    }

    #[test]
    fn wilder_smoothing_after_seed() {
        // seed over (+1, -1): gain 0.5, loss 0.5
        // next change +2: gain (0.5 + 2) / 2 = 1.25, loss 0.25 -> 100 * 1.25 / 1.5
        let v = rsi(&[10.0, 11.0, 10.0, 12.0], 2).unwrap();
        assert!(approx(v, 100.0 * 1.25 / 1.5));
    }

    #[test]
    fn monotonic_increase_is_100() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        assert!(approx(rsi(&closes, 6).unwrap(), 100.0));
    }

    #[test]
    fn monotonic_decrease_is_0() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        assert!(approx(rsi(&closes, 6).unwrap(), 0.0));
    }

    #[test]
    fn flat_series_is_0() {
        assert_eq!(rsi(&[5.0; 10], 6), Some(0.0));
    }

    #[test]
    fn mostly_rising_series_tends_high() {
        let mut closes = vec![100.0];
        for i in 1..30 {
            let step = if i % 5 == 0 { -0.5 } else { 1.0 };
            closes.push(closes[i - 1] + step);
        }
        let v = rsi(&closes, 6).unwrap();
        assert!(v > 70.0 && v < 100.0, "rsi = {}", v);
    }

    #[test]
    fn same_input_same_output() {
        let closes = [3.0, 4.5, 4.0, 5.5, 5.0, 6.0, 5.8, 6.4];
        assert_eq!(rsi(&closes, 4), rsi(&closes, 4));
    }
}
