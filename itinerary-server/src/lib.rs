//! Day itinerary planner server.
//!
//! A web service that answers: "Given these activities, their opening
//! hours and the travel times between them, what is the most valuable day
//! I can fit into my time budget?"

pub mod domain;
pub mod planner;
pub mod web;
