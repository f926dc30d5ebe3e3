//! Search configuration for the itinerary planner.

use std::time::Duration;

/// Configuration parameters for itinerary search.
///
/// With the defaults the search is unbounded: every non-dominated partial
/// itinerary is explored. The limits exist to cap the worst case on dense
/// instances, where the state space grows exponentially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of states expanded by one engine run.
    /// A run that hits this returns the best state found so far.
    pub max_expansions: Option<usize>,

    /// Wall-clock limit for a whole solve (milliseconds), shared by all
    /// starting activities.
    pub time_limit_ms: Option<u64>,

    /// Run independent starting activities on the rayon pool.
    pub parallel: bool,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_expansions: Option<usize>, time_limit_ms: Option<u64>, parallel: bool) -> Self {
        Self {
            max_expansions,
            time_limit_ms,
            parallel,
        }
    }

    /// Returns the time limit as a Duration.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: None,
            time_limit_ms: None,
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.max_expansions, None);
        assert_eq!(config.time_limit_ms, None);
        assert!(config.parallel);
        assert_eq!(config.time_limit(), None);
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(Some(500), Some(1500), false);

        assert_eq!(config.max_expansions, Some(500));
        assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
        assert!(!config.parallel);
    }
}
