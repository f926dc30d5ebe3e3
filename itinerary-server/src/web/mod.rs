//! Web layer for the itinerary planner.
//!
//! Provides the HTTP endpoint that turns a JSON problem description into a
//! planned day.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
