//! Activity types.

use std::fmt;

use super::InstanceError;

/// Identifier of an activity, unique within an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivityId(pub i64);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A candidate activity for the day.
///
/// Times are expressed in hours from the start of the day. The window
/// `[open_time, close_time]` constrains when the activity may *start*;
/// it may finish after `close_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: ActivityId,

    /// Display name, carried through to the result untouched.
    pub name: String,

    /// Utility gained by performing the activity.
    pub value: f64,

    /// Time the activity takes once started.
    pub duration: f64,

    /// Earliest start time.
    pub open_time: f64,

    /// Latest start time.
    pub close_time: f64,
}

impl Activity {
    /// Create a new activity.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        value: f64,
        duration: f64,
        open_time: f64,
        close_time: f64,
    ) -> Self {
        Self {
            id: ActivityId(id),
            name: name.into(),
            value,
            duration,
            open_time,
            close_time,
        }
    }

    /// Check the activity's own invariants.
    pub fn validate(&self) -> Result<(), InstanceError> {
        let invalid = |reason| InstanceError::InvalidActivity {
            id: self.id,
            reason,
        };

        if !self.value.is_finite() || self.value < 0.0 {
            return Err(invalid("value must be finite and non-negative"));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(invalid("duration must be finite and non-negative"));
        }
        if !self.open_time.is_finite() || !self.close_time.is_finite() {
            return Err(invalid("time window must be finite"));
        }
        if self.open_time > self.close_time {
            return Err(invalid("open_time must not be after close_time"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_activity() {
        let a = Activity::new(1, "Museum", 10.0, 2.0, 9.0, 15.0);
        assert!(a.validate().is_ok());
        assert_eq!(a.id, ActivityId(1));
        assert_eq!(a.name, "Museum");
    }

    #[test]
    fn zero_length_window_is_valid() {
        let a = Activity::new(1, "Sunrise", 1.0, 0.0, 0.0, 0.0);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn rejects_negative_value() {
        let a = Activity::new(3, "Bad", -1.0, 1.0, 0.0, 1.0);
        assert!(matches!(
            a.validate(),
            Err(InstanceError::InvalidActivity { id: ActivityId(3), .. })
        ));
    }

    #[test]
    fn rejects_negative_duration() {
        let a = Activity::new(3, "Bad", 1.0, -0.5, 0.0, 1.0);
        assert!(a.validate().is_err());
    }

    #[test]
    fn rejects_inverted_window() {
        let a = Activity::new(3, "Bad", 1.0, 1.0, 5.0, 4.0);
        assert!(a.validate().is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Activity::new(1, "x", f64::NAN, 1.0, 0.0, 1.0).validate().is_err());
        assert!(Activity::new(1, "x", 1.0, f64::INFINITY, 0.0, 1.0).validate().is_err());
        assert!(Activity::new(1, "x", 1.0, 1.0, f64::NEG_INFINITY, 1.0).validate().is_err());
    }

    #[test]
    fn id_display() {
        assert_eq!(ActivityId(-4).to_string(), "-4");
    }
}
