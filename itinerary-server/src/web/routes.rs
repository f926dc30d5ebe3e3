//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::domain::InstanceError;
use crate::planner::Planner;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// Any origin may call the API; the planner has no credentials to protect.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/optimize", post(optimize))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root endpoint.
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Itinerary planner is running",
    })
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Longest prefix of a rejected request body that is logged.
const LOGGED_BODY_LIMIT: usize = 512;

/// Printable prefix of a request body for log lines.
fn body_excerpt(body: &[u8]) -> String {
    let end = body.len().min(LOGGED_BODY_LIMIT);
    let mut excerpt = String::from_utf8_lossy(&body[..end]).into_owned();
    if body.len() > end {
        excerpt.push_str(&format!("... ({} bytes total)", body.len()));
    }
    excerpt
}

/// Plan the best day for the posted activities.
async fn optimize(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlannerRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %body_excerpt(&body), "JSON parse error");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let instance = req.into_instance()?;
    info!(
        activities = instance.len(),
        modes = instance.modes().len(),
        tmax = instance.tmax(),
        "planning request"
    );

    // The search is CPU-bound; keep it off the async workers
    let config = state.config.clone();
    let response = tokio::task::spawn_blocking(move || {
        let solution = Planner::new(&instance, &config).solve();
        PlannerResponse::from_solution(&instance, &solution)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("planner task failed: {e}"),
    })?;

    Ok(Json(response).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<InstanceError> for AppError {
    fn from(e: InstanceError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
