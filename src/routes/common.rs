//! Unauthenticated service routes.

use crate::doc::ApiDoc;
use crate::response;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use utoipa::OpenApi;

/// Liveness only; never touches the pool.
async fn health() -> impl IntoResponse {
    response::ok("status", "ok")
}

/// 200 while the pool can run a query, 503 otherwise.
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").fetch_optional(&state.pool).await {
        Ok(_) => response::ok("database", "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            response::keyed(StatusCode::SERVICE_UNAVAILABLE, "database", "unavailable")
        }
    }
}

/// `{"garage-drives": "<semver>"}`.
async fn version() -> impl IntoResponse {
    response::ok(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route("/openapi.json", get(openapi))
        .with_state(state)
}
