use utils::Candle;

/// Volume of the last bar relative to the trailing average ending one bar earlier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeRatio {
    /// `volume[last] / vol_ma[last - 1]`
    pub ratio: f64,
    /// Trailing mean of volume over the window ending at the last bar
    pub vol_ma: f64,
    /// Volume of the last bar
    pub volume: f64,
}

/// Rolling mean with a window of `n`.
///
/// Entry `i` is the mean of `values[i + 1 - n..=i]`, or `None` while fewer
/// than `n` values are available (and for every entry when `n == 0`).
pub fn rolling_mean(values: &[f64], n: usize) -> Vec<Option<f64>> {
    if n == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            (i + 1 >= n).then(|| values[i + 1 - n..=i].iter().sum::<f64>() / n as f64)
        })
        .collect()
}

/// Volume ratio at the last candle for a moving average of `n` bars.
///
/// Needs at least `n + 1` candles so the previous bar's average exists.
/// A zero previous average yields an infinite (or NaN) ratio, as plain
/// float division does.
pub fn volume_ratio(candles: &[Candle], n: usize) -> Option<VolumeRatio> {
    if n == 0 || candles.len() < n + 1 {
        return None;
    }
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
    let vol_ma = rolling_mean(&volumes, n);
    let last = volumes.len() - 1;
    let prev_ma = vol_ma[last - 1]?;
    let volume = volumes[last];
    Some(VolumeRatio {
        ratio: volume / prev_ma,
        vol_ma: vol_ma[last]?,
        volume,
    })
}
