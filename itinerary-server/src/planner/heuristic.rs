//! Optimistic estimate of the value still obtainable.
//!
//! The estimate relaxes the problem to a fractional knapsack: travel and
//! time windows are ignored, and unvisited activities are packed into the
//! remaining time by value per hour, with the last one taken fractionally.
//! Once penalized travel enters the objective this is no longer a proven
//! upper bound, so the engine uses it as a guide only.

use fixedbitset::FixedBitSet;

use crate::domain::Instance;

/// Floor applied to durations when ranking by value per hour.
pub const MIN_DURATION: f64 = 1e-9;

/// Heuristic estimator for one instance.
///
/// The efficiency ranking does not depend on the search state, so it is
/// computed once and shared by every engine run.
#[derive(Debug, Clone)]
pub struct Heuristic {
    /// Activity positions, most valuable per hour first.
    /// Equal ratios keep input order.
    by_efficiency: Vec<usize>,
}

impl Heuristic {
    /// Rank the activities of an instance.
    pub fn new(instance: &Instance) -> Self {
        let efficiency = |idx: usize| {
            let a = instance.activity(idx);
            a.value / a.duration.max(MIN_DURATION)
        };

        let mut by_efficiency: Vec<usize> = (0..instance.len()).collect();
        by_efficiency.sort_by(|&a, &b| efficiency(b).total_cmp(&efficiency(a)));

        Self { by_efficiency }
    }

    /// Estimate for a state at `time` having visited `visited`.
    ///
    /// Returns the *negated* obtainable value, so it is always `<= 0`.
    pub fn estimate(&self, instance: &Instance, visited: &FixedBitSet, time: f64) -> f64 {
        let remaining = instance.tmax() - time;
        if remaining <= 0.0 {
            return 0.0;
        }

        let mut possible = 0.0;
        let mut used = 0.0;

        for &idx in &self.by_efficiency {
            if visited.contains(idx) {
                continue;
            }
            let activity = instance.activity(idx);
            if used + activity.duration <= remaining {
                possible += activity.value;
                used += activity.duration;
            } else {
                let left = remaining - used;
                if left > 0.0 {
                    possible += activity.value * left / activity.duration;
                }
                break;
            }
        }

        -possible
    }
}
