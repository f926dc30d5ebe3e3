//! Domain error types.
//!
//! These errors represent configuration failures in a problem instance.
//! They are raised at construction time, before any search runs, and are
//! distinct from infeasibility (which the planner treats as normal pruning).

use super::ActivityId;

/// Errors raised while building an [`Instance`](super::Instance).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InstanceError {
    /// Two activities share the same identifier
    #[error("duplicate activity id {0}")]
    DuplicateActivityId(ActivityId),

    /// An activity carries an impossible value, duration or window
    #[error("invalid activity {id}: {reason}")]
    InvalidActivity { id: ActivityId, reason: &'static str },

    /// A travel matrix has the wrong number of rows
    #[error("travel matrix '{mode}' has {rows} rows, expected {expected}")]
    MatrixRows {
        mode: String,
        rows: usize,
        expected: usize,
    },

    /// A travel matrix row has the wrong number of columns
    #[error("travel matrix '{mode}' row {row} has {columns} columns, expected {expected}")]
    MatrixColumns {
        mode: String,
        row: usize,
        columns: usize,
        expected: usize,
    },

    /// A travel time is negative, NaN or infinite
    #[error("travel matrix '{mode}' has invalid travel time at [{row}][{column}]")]
    InvalidTravelTime {
        mode: String,
        row: usize,
        column: usize,
    },

    /// The same transport mode was configured twice
    #[error("transport mode '{0}' configured more than once")]
    DuplicateMode(String),

    /// The penalized mode names no configured travel matrix
    #[error("penalized transport mode '{0}' has no travel matrix")]
    UnknownPenalizedMode(String),

    /// The penalized mode is configured but never offered as a hop
    #[error("penalized transport mode '{0}' is unused when named modes are configured")]
    InactivePenalizedMode(String),

    /// The fixed start does not name an activity of the instance
    #[error("start activity {0} is not among the activities")]
    UnknownStartActivity(ActivityId),

    /// A scalar parameter is out of range
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}
