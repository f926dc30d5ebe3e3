//! Problem instance: activities, travel matrices and day parameters.

use std::collections::HashMap;

use super::{Activity, ActivityId, InstanceError};

/// Name of the mode backed by the instance's required travel matrix.
pub const GENERAL_MODE: &str = "general";

/// Penalty weight applied when the caller does not provide one.
pub const DEFAULT_ALPHA: f64 = 0.25;

/// Square matrix of travel times, indexed by activity position.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelMatrix {
    size: usize,
    times: Vec<f64>,
}

impl TravelMatrix {
    /// Build a matrix from rows, checking it is `size` x `size`.
    ///
    /// `mode` is only used to label errors.
    pub fn from_rows(
        mode: &str,
        rows: Vec<Vec<f64>>,
        size: usize,
    ) -> Result<Self, InstanceError> {
        if rows.len() != size {
            return Err(InstanceError::MatrixRows {
                mode: mode.to_string(),
                rows: rows.len(),
                expected: size,
            });
        }

        let mut times = Vec::with_capacity(size * size);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(InstanceError::MatrixColumns {
                    mode: mode.to_string(),
                    row: row_idx,
                    columns: row.len(),
                    expected: size,
                });
            }
            for (column, time) in row.into_iter().enumerate() {
                if !time.is_finite() || time < 0.0 {
                    return Err(InstanceError::InvalidTravelTime {
                        mode: mode.to_string(),
                        row: row_idx,
                        column,
                    });
                }
                times.push(time);
            }
        }

        Ok(Self { size, times })
    }

    /// Travel time from position `from` to position `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.times[from * self.size + to]
    }
}

/// A named transport mode with its own travel times.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportMode {
    pub name: String,
    pub matrix: TravelMatrix,
}

/// One way of getting from one activity to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportOption {
    /// Index into [`Instance::modes`], or `None` when staying in place.
    pub mode: Option<usize>,

    /// Travel time actually spent.
    pub travel: f64,

    /// Part of `travel` charged against the objective.
    pub penalized: f64,
}

impl TransportOption {
    /// The zero-cost option for remaining at the current activity.
    pub const STAY: TransportOption = TransportOption {
        mode: None,
        travel: 0.0,
        penalized: 0.0,
    };
}

/// An immutable, validated problem instance.
///
/// Mode 0 is always the general matrix. Named modes follow in the order
/// they were added. When at least one named mode exists, hops choose
/// among the named modes only; otherwise they use the general matrix.
#[derive(Debug, Clone)]
pub struct Instance {
    activities: Vec<Activity>,
    positions: HashMap<ActivityId, usize>,
    modes: Vec<TransportMode>,
    penalized_mode: Option<usize>,
    tmax: f64,
    alpha: f64,
    start: Option<usize>,
}

impl Instance {
    /// Start building an instance from activities and the general matrix.
    pub fn builder(activities: Vec<Activity>, travel_time: Vec<Vec<f64>>) -> InstanceBuilder {
        InstanceBuilder {
            activities,
            travel_time,
            modes: Vec::new(),
            penalized_mode: None,
            tmax: 0.0,
            alpha: DEFAULT_ALPHA,
            start_id: None,
        }
    }

    /// All activities, in input order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Activity at a position.
    pub fn activity(&self, position: usize) -> &Activity {
        &self.activities[position]
    }

    /// Number of activities.
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the instance has no activities.
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Position of an activity by id.
    pub fn position(&self, id: ActivityId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Configured transport modes, general first.
    pub fn modes(&self) -> &[TransportMode] {
        &self.modes
    }

    /// Name of a mode by index.
    pub fn mode_name(&self, mode: usize) -> &str {
        &self.modes[mode].name
    }

    /// Index of the penalized mode, if any.
    pub fn penalized_mode(&self) -> Option<usize> {
        self.penalized_mode
    }

    /// Time budget for the day.
    pub fn tmax(&self) -> f64 {
        self.tmax
    }

    /// Penalty weight applied to penalized travel time.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Position of the fixed start activity, if any.
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    /// Travel options between two distinct positions.
    pub fn transport_options(
        &self,
        from: usize,
        to: usize,
    ) -> impl Iterator<Item = TransportOption> + '_ {
        let first = if self.modes.len() > 1 { 1 } else { 0 };
        (first..self.modes.len()).map(move |mode| {
            let travel = self.modes[mode].matrix.get(from, to);
            let penalized = if self.penalized_mode == Some(mode) {
                travel
            } else {
                0.0
            };
            TransportOption {
                mode: Some(mode),
                travel,
                penalized,
            }
        })
    }
}

/// Builder for [`Instance`]; all validation happens in [`InstanceBuilder::build`].
#[derive(Debug, Clone)]
pub struct InstanceBuilder {
    activities: Vec<Activity>,
    travel_time: Vec<Vec<f64>>,
    modes: Vec<(String, Vec<Vec<f64>>)>,
    penalized_mode: Option<String>,
    tmax: f64,
    alpha: f64,
    start_id: Option<ActivityId>,
}

impl InstanceBuilder {
    /// Add a named transport mode.
    pub fn mode(mut self, name: impl Into<String>, travel_time: Vec<Vec<f64>>) -> Self {
        self.modes.push((name.into(), travel_time));
        self
    }

    /// Select the mode whose travel time is charged against the objective.
    pub fn penalized_mode(mut self, name: impl Into<String>) -> Self {
        self.penalized_mode = Some(name.into());
        self
    }

    /// Set the day's time budget.
    pub fn tmax(mut self, tmax: f64) -> Self {
        self.tmax = tmax;
        self
    }

    /// Set the penalty weight.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Fix the starting activity.
    pub fn start_id(mut self, id: i64) -> Self {
        self.start_id = Some(ActivityId(id));
        self
    }

    /// Validate and build the instance.
    pub fn build(self) -> Result<Instance, InstanceError> {
        if !self.tmax.is_finite() {
            return Err(InstanceError::InvalidParameter {
                name: "tmax",
                reason: "must be finite",
            });
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(InstanceError::InvalidParameter {
                name: "alpha",
                reason: "must be finite and non-negative",
            });
        }

        let size = self.activities.len();
        let mut positions = HashMap::with_capacity(size);
        for (idx, activity) in self.activities.iter().enumerate() {
            activity.validate()?;
            if positions.insert(activity.id, idx).is_some() {
                return Err(InstanceError::DuplicateActivityId(activity.id));
            }
        }

        let mut modes = Vec::with_capacity(self.modes.len() + 1);
        modes.push(TransportMode {
            name: GENERAL_MODE.to_string(),
            matrix: TravelMatrix::from_rows(GENERAL_MODE, self.travel_time, size)?,
        });
        for (name, rows) in self.modes {
            if modes.iter().any(|m| m.name == name) {
                return Err(InstanceError::DuplicateMode(name));
            }
            let matrix = TravelMatrix::from_rows(&name, rows, size)?;
            modes.push(TransportMode { name, matrix });
        }

        let penalized_mode = match self.penalized_mode {
            Some(name) => match modes.iter().position(|m| m.name == name) {
                None => return Err(InstanceError::UnknownPenalizedMode(name)),
                // Named modes take over every hop from the general matrix
                Some(0) if modes.len() > 1 => {
                    return Err(InstanceError::InactivePenalizedMode(name));
                }
                Some(idx) => Some(idx),
            },
            None => None,
        };

        let start = match self.start_id {
            Some(id) => Some(
                positions
                    .get(&id)
                    .copied()
                    .ok_or(InstanceError::UnknownStartActivity(id))?,
            ),
            None => None,
        };

        Ok(Instance {
            activities: self.activities,
            positions,
            modes,
            penalized_mode,
            tmax: self.tmax,
            alpha: self.alpha,
            start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_activities() -> Vec<Activity> {
        vec![
            Activity::new(10, "A", 5.0, 1.0, 0.0, 5.0),
            Activity::new(20, "B", 7.0, 2.0, 1.0, 6.0),
        ]
    }

    fn square(a: f64, b: f64) -> Vec<Vec<f64>> {
        vec![vec![0.0, a], vec![b, 0.0]]
    }

    #[test]
    fn builds_valid_instance() {
        let inst = Instance::builder(two_activities(), square(1.0, 2.0))
            .tmax(10.0)
            .alpha(0.5)
            .build()
            .unwrap();

        assert_eq!(inst.len(), 2);
        assert_eq!(inst.activities()[1].name, "B");
        assert_eq!(inst.tmax(), 10.0);
        assert_eq!(inst.alpha(), 0.5);
        assert_eq!(inst.position(ActivityId(20)), Some(1));
        assert_eq!(inst.position(ActivityId(99)), None);
        assert_eq!(inst.start(), None);
        assert_eq!(inst.modes().len(), 1);
        assert_eq!(inst.mode_name(0), GENERAL_MODE);
    }

    #[test]
    fn default_alpha() {
        let inst = Instance::builder(vec![], vec![]).build().unwrap();
        assert_eq!(inst.alpha(), DEFAULT_ALPHA);
        assert!(inst.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let activities = vec![
            Activity::new(1, "A", 1.0, 1.0, 0.0, 5.0),
            Activity::new(1, "B", 1.0, 1.0, 0.0, 5.0),
        ];
        let err = Instance::builder(activities, square(1.0, 1.0))
            .build()
            .unwrap_err();
        assert_eq!(err, InstanceError::DuplicateActivityId(ActivityId(1)));
    }

    #[test]
    fn rejects_wrong_row_count() {
        let err = Instance::builder(two_activities(), vec![vec![0.0, 1.0]])
            .build()
            .unwrap_err();
        assert!(matches!(err, InstanceError::MatrixRows { rows: 1, expected: 2, .. }));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Instance::builder(two_activities(), vec![vec![0.0, 1.0], vec![0.0]])
            .build()
            .unwrap_err();
        assert!(matches!(err, InstanceError::MatrixColumns { row: 1, columns: 1, .. }));
    }

    #[test]
    fn rejects_bad_named_matrix() {
        let err = Instance::builder(two_activities(), square(1.0, 1.0))
            .mode("car", vec![vec![0.0, 1.0, 2.0]; 2])
            .build()
            .unwrap_err();
        match err {
            InstanceError::MatrixColumns { mode, .. } => assert_eq!(mode, "car"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_travel_time() {
        let err = Instance::builder(two_activities(), square(-1.0, 1.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, InstanceError::InvalidTravelTime { row: 0, column: 1, .. }));
    }

    #[test]
    fn rejects_unknown_start() {
        let err = Instance::builder(two_activities(), square(1.0, 1.0))
            .start_id(3)
            .build()
            .unwrap_err();
        assert_eq!(err, InstanceError::UnknownStartActivity(ActivityId(3)));
    }

    #[test]
    fn resolves_start_position() {
        let inst = Instance::builder(two_activities(), square(1.0, 1.0))
            .start_id(20)
            .build()
            .unwrap();
        assert_eq!(inst.start(), Some(1));
    }

    #[test]
    fn rejects_unknown_penalized_mode() {
        let err = Instance::builder(two_activities(), square(1.0, 1.0))
            .mode("car", square(1.0, 1.0))
            .penalized_mode("boat")
            .build()
            .unwrap_err();
        assert_eq!(err, InstanceError::UnknownPenalizedMode("boat".into()));
    }

    #[test]
    fn rejects_general_penalty_alongside_named_modes() {
        let err = Instance::builder(two_activities(), square(3.0, 3.0))
            .mode("car", square(3.0, 3.0))
            .penalized_mode(GENERAL_MODE)
            .alpha(100.0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            InstanceError::InactivePenalizedMode(GENERAL_MODE.into())
        );
    }

    #[test]
    fn rejects_duplicate_mode() {
        let err = Instance::builder(two_activities(), square(1.0, 1.0))
            .mode("car", square(1.0, 1.0))
            .mode("car", square(2.0, 2.0))
            .build()
            .unwrap_err();
        assert_eq!(err, InstanceError::DuplicateMode("car".into()));

        let err = Instance::builder(two_activities(), square(1.0, 1.0))
            .mode(GENERAL_MODE, square(1.0, 1.0))
            .build()
            .unwrap_err();
        assert_eq!(err, InstanceError::DuplicateMode(GENERAL_MODE.into()));
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(Instance::builder(vec![], vec![]).alpha(-0.1).build().is_err());
        assert!(Instance::builder(vec![], vec![]).alpha(f64::NAN).build().is_err());
        assert!(Instance::builder(vec![], vec![]).tmax(f64::INFINITY).build().is_err());
    }

    #[test]
    fn general_matrix_used_without_named_modes() {
        let inst = Instance::builder(two_activities(), square(1.5, 2.5))
            .penalized_mode(GENERAL_MODE)
            .build()
            .unwrap();

        let options: Vec<_> = inst.transport_options(0, 1).collect();
        assert_eq!(
            options,
            vec![TransportOption {
                mode: Some(0),
                travel: 1.5,
                penalized: 1.5,
            }]
        );
    }

    #[test]
    fn named_modes_replace_general_matrix() {
        let inst = Instance::builder(two_activities(), square(9.0, 9.0))
            .mode("bicycle", square(3.0, 3.0))
            .mode("car", square(1.0, 1.0))
            .penalized_mode("car")
            .build()
            .unwrap();

        let options: Vec<_> = inst.transport_options(1, 0).collect();
        assert_eq!(options.len(), 2);
        assert_eq!(inst.mode_name(options[0].mode.unwrap()), "bicycle");
        assert_eq!(options[0].travel, 3.0);
        assert_eq!(options[0].penalized, 0.0);
        assert_eq!(inst.mode_name(options[1].mode.unwrap()), "car");
        assert_eq!(options[1].travel, 1.0);
        assert_eq!(options[1].penalized, 1.0);
    }
}
