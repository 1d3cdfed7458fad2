use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Latest applied migration, e.g. `20261016000006`. Null when the
    /// database is unreachable or unmigrated.
    pub schema_version: Option<i64>,
    /// Live entries in the public response cache.
    pub cached_responses: usize,
}

/// GET /health -- database reachability, schema level and cache size.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db_healthy, schema_version) = match faircms_db::schema_version(&state.pool).await {
        Ok(version) => (true, version),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            (false, None)
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema_version,
        cached_responses: state.response_cache.len(),
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
