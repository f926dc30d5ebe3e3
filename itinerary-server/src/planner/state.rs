//! Search states: immutable snapshots of partial itineraries.

use fixedbitset::FixedBitSet;

use crate::domain::{Instance, TransportOption};

use super::transition::{Transition, feasible_transition};

/// One entry of a route: an activity and the hop that led to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visit {
    /// Position of the activity in the instance.
    pub activity: usize,

    /// Mode used to get here; `None` for the first activity or a stay.
    pub mode: Option<usize>,

    /// Travel time spent on the hop.
    pub travel: f64,

    /// Time the activity started.
    pub start: f64,

    /// Time the activity finished.
    pub finish: f64,
}

/// A partial itinerary.
///
/// States are never modified once built; [`SearchState::successor`]
/// produces a new state for every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// Where the traveller is, or `None` before the day starts.
    pub current: Option<usize>,

    /// Elapsed time since the start of the day.
    pub time: f64,

    /// Sum of the values of visited activities.
    pub collected_value: f64,

    /// Travel time actually spent, whatever the mode.
    pub travel_cost: f64,

    /// Travel time spent on the penalized mode.
    pub penalized_travel_cost: f64,

    /// Positions of visited activities.
    pub visited: FixedBitSet,

    /// Visited activities in order.
    pub route: Vec<Visit>,
}

impl SearchState {
    /// The "no solution" state: nowhere, nothing collected.
    pub fn empty(instance: &Instance) -> Self {
        Self {
            current: None,
            time: 0.0,
            collected_value: 0.0,
            travel_cost: 0.0,
            penalized_travel_cost: 0.0,
            visited: FixedBitSet::with_capacity(instance.len()),
            route: Vec::new(),
        }
    }

    /// Standing at an activity at time zero without having performed it.
    ///
    /// The first expansion may then "stay" and perform it with no travel.
    /// Planner runs always start from [`SearchState::start_at`], so only
    /// the engine's own tests begin here.
    #[cfg(test)]
    pub(crate) fn positioned_at(instance: &Instance, activity: usize) -> Self {
        Self {
            current: Some(activity),
            ..Self::empty(instance)
        }
    }

    /// Perform `activity` first thing in the day, with no travel.
    ///
    /// Returns `None` if its window or the day budget rules it out.
    pub fn start_at(instance: &Instance, activity: usize) -> Option<Self> {
        let transition = feasible_transition(instance, activity, 0.0, 0.0).ok()?;
        Some(Self::empty(instance).successor(
            instance,
            activity,
            TransportOption::STAY,
            transition,
        ))
    }

    /// Collected value minus the weighted penalized travel.
    pub fn objective(&self, alpha: f64) -> f64 {
        self.collected_value - alpha * self.penalized_travel_cost
    }

    /// Whether an activity has been visited.
    pub fn has_visited(&self, activity: usize) -> bool {
        self.visited.contains(activity)
    }

    /// Activity positions in route order.
    pub fn route_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.route.iter().map(|v| v.activity)
    }

    /// The state reached by travelling to `activity` and performing it.
    ///
    /// `transition` must be the result of checking this hop.
    pub fn successor(
        &self,
        instance: &Instance,
        activity: usize,
        option: TransportOption,
        transition: Transition,
    ) -> Self {
        let mut visited = self.visited.clone();
        visited.insert(activity);

        let mut route = Vec::with_capacity(self.route.len() + 1);
        route.extend_from_slice(&self.route);
        route.push(Visit {
            activity,
            mode: option.mode,
            travel: option.travel,
            start: transition.start,
            finish: transition.finish,
        });

        Self {
            current: Some(activity),
            time: transition.finish,
            collected_value: self.collected_value + instance.activity(activity).value,
            travel_cost: self.travel_cost + option.travel,
            penalized_travel_cost: self.penalized_travel_cost + option.penalized,
            visited,
            route,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Activity;

    fn instance() -> Instance {
        Instance::builder(
            vec![
                Activity::new(1, "A", 10.0, 1.0, 0.0, 5.0),
                Activity::new(2, "B", 6.0, 2.0, 2.0, 5.0),
                Activity::new(3, "Late", 3.0, 1.0, 4.0, 5.0),
            ],
            vec![vec![0.0, 1.0, 1.0], vec![1.0, 0.0, 1.0], vec![1.0, 1.0, 0.0]],
        )
        .tmax(8.0)
        .alpha(0.5)
        .build()
        .unwrap()
    }

    #[test]
    fn empty_state() {
        let inst = instance();
        let s = SearchState::empty(&inst);
        assert_eq!(s.current, None);
        assert_eq!(s.objective(inst.alpha()), 0.0);
        assert!(s.route.is_empty());
        assert_eq!(s.visited.count_ones(..), 0);
    }

    #[test]
    fn start_at_feasible_activity() {
        let inst = instance();
        let s = SearchState::start_at(&inst, 0).unwrap();
        assert_eq!(s.current, Some(0));
        assert_eq!(s.time, 1.0);
        assert_eq!(s.collected_value, 10.0);
        assert!(s.has_visited(0));
        assert_eq!(s.route_positions().collect::<Vec<_>>(), vec![0]);
        assert_eq!(s.route[0].mode, None);
    }

    #[test]
    fn start_at_waits_for_window() {
        let inst = instance();
        let s = SearchState::start_at(&inst, 1).unwrap();
        assert_eq!(s.route[0].start, 2.0);
        assert_eq!(s.time, 4.0);
    }

    #[test]
    fn successor_accumulates_costs() {
        let inst = instance();
        let s0 = SearchState::start_at(&inst, 0).unwrap();
        let option = TransportOption {
            mode: Some(0),
            travel: 1.0,
            penalized: 1.0,
        };
        let transition = feasible_transition(&inst, 1, s0.time, option.travel).unwrap();
        let s1 = s0.successor(&inst, 1, option, transition);

        assert_eq!(s1.current, Some(1));
        assert_eq!(s1.time, 4.0);
        assert_eq!(s1.collected_value, 16.0);
        assert_eq!(s1.travel_cost, 1.0);
        assert_eq!(s1.penalized_travel_cost, 1.0);
        assert_eq!(s1.objective(inst.alpha()), 15.5);
        assert_eq!(s1.route_positions().collect::<Vec<_>>(), vec![0, 1]);

        // The predecessor is untouched
        assert_eq!(s0.route.len(), 1);
        assert!(!s0.has_visited(1));
    }

    #[test]
    fn positioned_state_has_not_visited() {
        let inst = instance();
        let s = SearchState::positioned_at(&inst, 2);
        assert_eq!(s.current, Some(2));
        assert!(!s.has_visited(2));
        assert_eq!(s.collected_value, 0.0);
    }
}
