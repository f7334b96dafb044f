/// Health check endpoint
///
/// Reports whether the server is running and which storage backend it uses.
/// With PostgreSQL configured, the pool is probed with `SELECT 1`.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "storage": "postgres connected"
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use littlelemon_shared::db::pool::health_check as db_health_check;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Storage backend status
    pub storage: String,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let (healthy, storage) = match &state.db {
        Some(pool) => match db_health_check(pool).await {
            Ok(()) => (true, "postgres connected"),
            Err(_) => (false, "postgres disconnected"),
        },
        None => (true, "in-memory"),
    };

    Ok(Json(HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: storage.to_string(),
    }))
}
