//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::SearchConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Planner configuration applied to every request
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
