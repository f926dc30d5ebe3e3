//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Activity, DEFAULT_ALPHA, Instance, InstanceError};
use crate::planner::{SearchStats, Solution};

/// An activity as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityInput {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub duration: f64,
    pub open_time: f64,
    pub close_time: f64,
}

/// Request to plan a day.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerRequest {
    /// Candidate activities
    pub activities: Vec<ActivityInput>,

    /// General travel-time matrix, one row per activity
    pub travel_time: Vec<Vec<f64>>,

    /// Travel times by bicycle
    #[serde(default, alias = "travel_time_bicicleta")]
    pub travel_time_bicycle: Option<Vec<Vec<f64>>>,

    /// Travel times by car
    #[serde(default, alias = "travel_time_auto")]
    pub travel_time_car: Option<Vec<Vec<f64>>>,

    /// Travel times by public transport
    #[serde(default, alias = "travel_time_transporte_publico")]
    pub travel_time_public_transport: Option<Vec<Vec<f64>>>,

    /// Mode whose travel time is penalized
    /// ("bicycle", "car", "public_transport" or "general")
    #[serde(default)]
    pub penalized_transport: Option<String>,

    /// Time available in the day
    pub tmax: f64,

    /// Penalty weight for penalized travel time
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Optional fixed starting activity
    #[serde(default)]
    pub start_id: Option<i64>,
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

/// Canonical name for a penalized mode, accepting the legacy spellings.
fn mode_name(name: &str) -> &str {
    match name {
        "bicicleta" => "bicycle",
        "auto" => "car",
        "transporte_publico" => "public_transport",
        other => other,
    }
}

impl PlannerRequest {
    /// Validate the request and build a problem instance.
    pub fn into_instance(self) -> Result<Instance, InstanceError> {
        let activities = self
            .activities
            .into_iter()
            .map(|a| Activity::new(a.id, a.name, a.value, a.duration, a.open_time, a.close_time))
            .collect();

        let mut builder = Instance::builder(activities, self.travel_time)
            .tmax(self.tmax)
            .alpha(self.alpha);

        let named = [
            ("bicycle", self.travel_time_bicycle),
            ("car", self.travel_time_car),
            ("public_transport", self.travel_time_public_transport),
        ];
        for (name, matrix) in named {
            if let Some(matrix) = matrix {
                builder = builder.mode(name, matrix);
            }
        }

        if let Some(mode) = &self.penalized_transport {
            builder = builder.penalized_mode(mode_name(mode));
        }
        if let Some(id) = self.start_id {
            builder = builder.start_id(id);
        }

        builder.build()
    }
}

/// An activity in the planned route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityOutput {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub duration: f64,
    pub open_time: f64,
    pub close_time: f64,
}

impl ActivityOutput {
    fn from_activity(activity: &Activity) -> Self {
        Self {
            id: activity.id.0,
            name: activity.name.clone(),
            value: activity.value,
            duration: activity.duration,
            open_time: activity.open_time,
            close_time: activity.close_time,
        }
    }
}

/// One hop of the planned day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    /// Activity performed
    pub activity_id: i64,

    /// Transport mode used to get there (absent for the first activity)
    pub mode: Option<String>,

    /// Travel time for the hop
    pub travel_time: f64,

    /// Start time of the activity
    pub start: f64,

    /// Finish time of the activity
    pub finish: f64,
}

/// Search counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStatsOutput {
    pub starts: usize,
    pub expanded: usize,
    pub pushed: usize,
    pub dominated: usize,
    pub exhausted: bool,
}

/// Response with the planned day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerResponse {
    /// Activities in visiting order
    pub route: Vec<ActivityOutput>,

    /// Sum of the route's values
    pub total_value: f64,

    /// Total travel time, all modes
    pub total_travel_cost: f64,

    /// Travel time on the penalized mode
    pub penalized_travel_cost: f64,

    /// Time the last activity finishes
    pub final_time: f64,

    /// Total value minus alpha times penalized travel
    pub objective: f64,

    /// Per-hop timing
    pub schedule: Vec<ScheduleEntry>,

    pub stats: SearchStatsOutput,
}

/// Round to two decimal places.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl PlannerResponse {
    /// Render a solution of `instance`.
    pub fn from_solution(instance: &Instance, solution: &Solution) -> Self {
        let best = &solution.best;

        let route = best
            .route_positions()
            .map(|p| ActivityOutput::from_activity(instance.activity(p)))
            .collect();

        let schedule = best
            .route
            .iter()
            .map(|visit| ScheduleEntry {
                activity_id: instance.activity(visit.activity).id.0,
                mode: visit.mode.map(|m| instance.mode_name(m).to_string()),
                travel_time: round2(visit.travel),
                start: round2(visit.start),
                finish: round2(visit.finish),
            })
            .collect();

        let SearchStats {
            expanded,
            pushed,
            dominated,
        } = solution.stats;

        Self {
            route,
            total_value: best.collected_value,
            total_travel_cost: round2(best.travel_cost),
            penalized_travel_cost: round2(best.penalized_travel_cost),
            final_time: round2(best.time),
            objective: round2(best.objective(instance.alpha())),
            schedule,
            stats: SearchStatsOutput {
                starts: solution.starts,
                expanded,
                pushed,
                dominated,
                exhausted: solution.exhausted,
            },
        }
    }
}

/// Liveness message for the root endpoint.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
