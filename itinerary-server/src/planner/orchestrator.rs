//! Multi-start orchestration.
//!
//! With a fixed start the engine runs once. Otherwise every activity that
//! can be performed first thing in the day seeds its own independent run,
//! and the best result across runs wins.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::domain::Instance;

use super::config::SearchConfig;
use super::heuristic::Heuristic;
use super::search::{BestFirstSearch, SearchOutcome, SearchStats};
use super::state::SearchState;

/// Result of planning a day.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Best itinerary found; empty when nothing is feasible.
    pub best: SearchState,

    /// Counters summed over all engine runs.
    pub stats: SearchStats,

    /// Number of starting activities searched.
    pub starts: usize,

    /// `false` if any run was cut short by a limit.
    pub exhausted: bool,
}

impl Solution {
    /// The "no solution possible" result.
    fn empty(instance: &Instance) -> Self {
        Self {
            best: SearchState::empty(instance),
            stats: SearchStats::default(),
            starts: 0,
            exhausted: true,
        }
    }
}

/// Day planner over a validated instance.
pub struct Planner<'a> {
    instance: &'a Instance,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(instance: &'a Instance, config: &'a SearchConfig) -> Self {
        Self { instance, config }
    }

    /// Find the best itinerary.
    pub fn solve(&self) -> Solution {
        let instance = self.instance;
        let deadline = self.config.time_limit().map(|limit| Instant::now() + limit);
        let heuristic = Heuristic::new(instance);
        let engine = BestFirstSearch::new(instance, &heuristic, self.config, deadline);

        let starts: Vec<SearchState> = match instance.start() {
            Some(start) => SearchState::start_at(instance, start).into_iter().collect(),
            None => (0..instance.len())
                .filter_map(|idx| SearchState::start_at(instance, idx))
                .collect(),
        };

        if starts.is_empty() {
            info!(activities = instance.len(), "no feasible starting activity");
            return Solution::empty(instance);
        }

        debug!(
            starts = starts.len(),
            parallel = self.config.parallel,
            "searching from starting activities"
        );

        let outcomes: Vec<SearchOutcome> = if self.config.parallel {
            starts.into_par_iter().map(|s| engine.run(s)).collect()
        } else {
            starts.into_iter().map(|s| engine.run(s)).collect()
        };

        let solution = select_best(instance, outcomes);

        info!(
            starts = solution.starts,
            expanded = solution.stats.expanded,
            dominated = solution.stats.dominated,
            exhausted = solution.exhausted,
            objective = solution.best.objective(instance.alpha()),
            "search complete"
        );

        solution
    }
}

/// Keep the outcome with the strictly highest objective.
///
/// Outcomes arrive in activity order, so ties go to the earliest start
/// whether or not the runs were parallel.
fn select_best(instance: &Instance, outcomes: Vec<SearchOutcome>) -> Solution {
    let alpha = instance.alpha();
    let mut solution = Solution::empty(instance);
    let mut found = false;

    for outcome in outcomes {
        solution.starts += 1;
        solution.stats.merge(&outcome.stats);
        solution.exhausted &= outcome.exhausted;

        if !found || outcome.best.objective(alpha) > solution.best.objective(alpha) {
            solution.best = outcome.best;
            found = true;
        }
    }

    solution
}
