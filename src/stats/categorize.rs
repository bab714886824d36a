//! Gain/loss categorization of monthly deltas.

use crate::stats::YearlyDelta;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default magnitude separating a meaningful gain or loss from noise.
pub const DEFAULT_THRESHOLD: i64 = 500_000;

/// Share of months, in whole percent, whose delta clears the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub positive_share: u8,
    pub negative_share: u8,
}

/// Percentage of `count` over `months`, rounded half to even.
fn share(count: usize, months: usize) -> u8 {
    if months == 0 {
        return 0;
    }
    let pct = (count as f64 / months as f64 * 100.0).round_ties_even();
    pct.clamp(0.0, 100.0) as u8
}

/// Bucket deltas into gains above `threshold` and losses below `-threshold`.
///
/// `threshold` is a magnitude; its sign is ignored. Shares are taken over the
/// number of distinct month labels and are 0 when there are none.
pub fn categorize(deltas: &[YearlyDelta], threshold: i64) -> CategorySummary {
    let magnitude = threshold.saturating_abs();
    let months = deltas
        .iter()
        .map(|d| d.month.as_str())
        .collect::<HashSet<_>>()
        .len();

    let gains = deltas.iter().filter(|d| d.delta > magnitude).count();
    let losses = deltas.iter().filter(|d| d.delta < -magnitude).count();

    CategorySummary {
        positive_share: share(gains, months),
        negative_share: share(losses, months),
    }
}
