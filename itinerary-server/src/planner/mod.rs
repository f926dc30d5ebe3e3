//! Itinerary planner using best-first search.
//!
//! This module implements the core planning algorithm that answers:
//! "Given these activities and a day's worth of time, which should I do,
//! in what order, and how should I travel between them?"
//!
//! Partial itineraries are explored most-promising first, guided by a
//! fractional-knapsack estimate of the value still obtainable, and pruned
//! when an equal-or-better itinerary already reached the same activity
//! having visited the same set.

mod config;
mod heuristic;
mod orchestrator;
mod search;
mod state;
mod transition;


pub use config::SearchConfig;
pub use heuristic::{Heuristic, MIN_DURATION};
pub use orchestrator::{Planner, Solution};
pub use search::{BestFirstSearch, SearchOutcome, SearchStats};
pub use state::{SearchState, Visit};
pub use transition::{Infeasible, Transition, feasible_transition};
