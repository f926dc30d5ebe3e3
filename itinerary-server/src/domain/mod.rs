//! Domain types for the itinerary planner.
//!
//! This module contains the problem model: activities, travel matrices and
//! the validated instance. All types enforce their invariants at
//! construction time, so the planner can trust them without re-checking.

mod activity;
mod error;
mod instance;

pub use activity::{Activity, ActivityId};
pub use error::InstanceError;
pub use instance::{
    DEFAULT_ALPHA, GENERAL_MODE, Instance, InstanceBuilder, TransportMode, TransportOption,
    TravelMatrix,
};
