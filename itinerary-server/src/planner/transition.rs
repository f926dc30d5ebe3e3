//! Transition feasibility.
//!
//! Decides whether an activity can be started after travelling to it, and
//! when it would start and finish.

use crate::domain::Instance;

/// Start and finish times of a feasible transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub start: f64,
    pub finish: f64,
}

/// Why a transition was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasible {
    /// Arrived (or waited until opening) after the start window closed.
    WindowMissed,

    /// The activity would finish after the day's budget.
    OverBudget,
}

/// Check whether activity `to` can be reached and performed.
///
/// `current_time` is the time the traveller leaves the previous activity
/// and `travel` the time the chosen hop takes (zero when staying put).
/// Arriving early means waiting until the window opens.
pub fn feasible_transition(
    instance: &Instance,
    to: usize,
    current_time: f64,
    travel: f64,
) -> Result<Transition, Infeasible> {
    let activity = instance.activity(to);

    let arrival = current_time + travel;
    let start = arrival.max(activity.open_time);
    if start > activity.close_time {
        return Err(Infeasible::WindowMissed);
    }

    let finish = start + activity.duration;
    if finish > instance.tmax() {
        return Err(Infeasible::OverBudget);
    }

    Ok(Transition { start, finish })
}
