//! Indicator computations over a fetched candle window or pool snapshot.
//!
//! Every function here is pure: the same input always yields the same
//! output, and a window too short for the indicator yields `None`.

pub mod apr;
pub mod rsi;
pub mod td_sequential;
pub mod volume;

pub use apr::{display_apr, has_active_reward, select_max_apr, AprPick};
pub use rsi::rsi;
pub use td_sequential::{td_sequential, td_sequential_series, TdBar, TdCounts};
pub use volume::{rolling_mean, volume_ratio, VolumeRatio};
