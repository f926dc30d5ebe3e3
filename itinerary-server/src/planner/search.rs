//! Best-first itinerary search.
//!
//! Explores partial itineraries from a single start state, most promising
//! first, pruning states that reach the same activity having visited the
//! same set of activities with no better objective.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use fixedbitset::FixedBitSet;
use tracing::trace;

use crate::domain::{Instance, TransportOption};

use super::config::SearchConfig;
use super::heuristic::Heuristic;
use super::state::SearchState;
use super::transition::feasible_transition;

/// How often (in expansions) the deadline is checked.
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// Counters describing one or more engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// States popped from the frontier.
    pub expanded: usize,

    /// Successors pushed onto the frontier.
    pub pushed: usize,

    /// Successors discarded by the dominance table.
    pub dominated: usize,
}

impl SearchStats {
    /// Add another run's counters to these.
    pub fn merge(&mut self, other: &SearchStats) {
        self.expanded += other.expanded;
        self.pushed += other.pushed;
        self.dominated += other.dominated;
    }
}

/// Result of one engine run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Highest-objective state encountered.
    pub best: SearchState,

    pub stats: SearchStats,

    /// `false` if a limit stopped the run before the frontier emptied.
    pub exhausted: bool,
}

/// Frontier entry.
///
/// Ordered so the max-heap pops the highest estimated total first, and
/// among equal estimates the earliest pushed.
struct HeapItem {
    estimate: f64,
    seq: u64,
    state: SearchState,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.estimate
            .total_cmp(&other.estimate)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Best-first search over one instance.
///
/// Each call to [`BestFirstSearch::run`] owns its frontier and dominance
/// table, so runs from different starts never interact.
pub struct BestFirstSearch<'a> {
    instance: &'a Instance,
    heuristic: &'a Heuristic,
    config: &'a SearchConfig,
    deadline: Option<Instant>,
}

impl<'a> BestFirstSearch<'a> {
    /// Create a new engine.
    ///
    /// `deadline` is absolute so that several runs can share one budget.
    pub fn new(
        instance: &'a Instance,
        heuristic: &'a Heuristic,
        config: &'a SearchConfig,
        deadline: Option<Instant>,
    ) -> Self {
        Self {
            instance,
            heuristic,
            config,
            deadline,
        }
    }

    /// Estimated total for a state: objective plus heuristic estimate.
    fn estimated_total(&self, state: &SearchState) -> f64 {
        state.objective(self.instance.alpha())
            + self
                .heuristic
                .estimate(self.instance, &state.visited, state.time)
    }

    /// Whether a limit says to stop before the next expansion.
    fn should_stop(&self, expanded: usize) -> bool {
        if self.config.max_expansions.is_some_and(|max| expanded >= max) {
            return true;
        }
        match self.deadline {
            Some(deadline) if expanded % DEADLINE_CHECK_INTERVAL == 0 => Instant::now() >= deadline,
            _ => false,
        }
    }

    /// Search from `start` and return the best state found.
    pub fn run(&self, start: SearchState) -> SearchOutcome {
        let alpha = self.instance.alpha();
        let mut stats = SearchStats::default();
        let mut seq = 0u64;

        let mut frontier = BinaryHeap::new();
        let mut seen: HashMap<(usize, FixedBitSet), f64> = HashMap::new();

        let mut best = start.clone();
        frontier.push(HeapItem {
            estimate: self.estimated_total(&start),
            seq,
            state: start,
        });

        let mut exhausted = true;

        while let Some(item) = frontier.pop() {
            if self.should_stop(stats.expanded) {
                exhausted = false;
                frontier.push(item);
                break;
            }
            stats.expanded += 1;
            let state = item.state;

            if state.objective(alpha) > best.objective(alpha) {
                best = state.clone();
            }

            for next in 0..self.instance.len() {
                if state.has_visited(next) {
                    continue;
                }

                let options: Vec<TransportOption> = match state.current {
                    Some(current) if current == next => vec![TransportOption::STAY],
                    Some(current) => self.instance.transport_options(current, next).collect(),
                    // A run from `SearchState::empty` may begin anywhere, with no travel
                    None => vec![TransportOption::STAY],
                };

                for option in options {
                    let transition =
                        match feasible_transition(self.instance, next, state.time, option.travel) {
                            Ok(t) => t,
                            Err(reason) => {
                                trace!(activity = next, ?reason, "transition pruned");
                                continue;
                            }
                        };

                    let successor = state.successor(self.instance, next, option, transition);
                    let value = successor.objective(alpha);

                    match seen.entry((next, successor.visited.clone())) {
                        Entry::Occupied(entry) if *entry.get() >= value => {
                            stats.dominated += 1;
                            continue;
                        }
                        Entry::Occupied(mut entry) => {
                            entry.insert(value);
                        }
                        Entry::Vacant(entry) => {
                            entry.insert(value);
                        }
                    }

                    seq += 1;
                    stats.pushed += 1;
                    frontier.push(HeapItem {
                        estimate: self.estimated_total(&successor),
                        seq,
                        state: successor,
                    });
                }
            }
        }

        if !exhausted {
            // Queued states already passed the feasibility check
            let mut queued = frontier.into_vec();
            queued.sort_by_key(|item| item.seq);
            for item in queued {
                if item.state.objective(alpha) > best.objective(alpha) {
                    best = item.state;
                }
            }
        }

        SearchOutcome {
            best,
            stats,
            exhausted,
        }
    }
}
