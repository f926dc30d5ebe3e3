use std::net::SocketAddr;
use std::str::FromStr;

use itinerary_server::planner::SearchConfig;
use itinerary_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Address used when `PLANNER_ADDR` is not set.
const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Read an optional environment variable, warning on values that don't parse.
fn env_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}

/// Build the search configuration from the environment.
fn search_config() -> SearchConfig {
    let defaults = SearchConfig::default();
    SearchConfig::new(
        env_var("PLANNER_MAX_EXPANSIONS").or(defaults.max_expansions),
        env_var("PLANNER_TIME_LIMIT_MS").or(defaults.time_limit_ms),
        env_var("PLANNER_PARALLEL").unwrap_or(defaults.parallel),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = env_var("PLANNER_ADDR").unwrap_or(DEFAULT_ADDR.parse()?);

    let config = search_config();
    info!(
        max_expansions = ?config.max_expansions,
        time_limit_ms = ?config.time_limit_ms,
        parallel = config.parallel,
        "search configuration"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Itinerary planner listening on http://{addr}");
    info!("  GET  /          - Liveness message");
    info!("  GET  /health    - Health check");
    info!("  POST /optimize  - Plan a day");

    axum::serve(listener, app).await?;
    Ok(())
}
