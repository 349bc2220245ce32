use clients_cetus::{PoolSnapshot, PoolStat};
use tracing::info;
use utils::round_to;

/// The pool with the highest APR after filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct AprPick {
    pub symbol: String,
    /// APR in percent: `100 * round(total_apr, 4)`
    pub display_apr: f64,
}

/// False when the pool has no rewarders, or every rewarder reports `"0%"` or `""`.
pub fn has_active_reward(rewarder_apr: &[String]) -> bool {
    rewarder_apr
        .iter()
        .any(|apr| !matches!(apr.as_str(), "0%" | ""))
}

/// Percent APR shown to the operator.
pub fn display_apr(pool: &PoolStat) -> f64 {
    100.0 * round_to(pool.total_apr, 4)
}

/// Highest-APR pool among those with an active mining reward.
///
/// The running maximum starts at zero and only a strictly greater APR
/// replaces it, so ties keep the first pool seen and pools at or below
/// zero are never picked.
pub fn select_max_apr(snapshot: &PoolSnapshot) -> Option<AprPick> {
    let mut best: Option<AprPick> = None;
    let mut max_apr = 0.0;
    for pool in &snapshot.pools {
        if !has_active_reward(&pool.rewarder_apr) {
            continue;
        }
        let apr = display_apr(pool);
        info!(
            symbol = %pool.symbol,
            total_apr = apr,
            reward_apr = ?pool.rewarder_apr,
            "pool apr"
        );
        if apr > max_apr {
            max_apr = apr;
            best = Some(AprPick {
                symbol: pool.symbol.clone(),
                display_apr: apr,
            });
        }
    }
    best
}
