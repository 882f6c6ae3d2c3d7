//! Liveness and readiness checks
//!
//! `/health` answers as long as the process serves requests.
//! `/health/db` also round-trips a query through the pool and answers 503
//! when PostgreSQL cannot be reached in time.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::http::server::AppState;

/// Upper bound on the readiness query, pool acquire included.
const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// GET /health
async fn liveness() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health/db
async fn readiness(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let check = sqlx::query("SELECT 1").execute(&state.pool);

    let (code, database) = match tokio::time::timeout(DB_CHECK_TIMEOUT, check).await {
        Ok(Ok(_)) => (StatusCode::OK, "up"),
        Ok(Err(err)) => {
            tracing::warn!("readiness query failed: {}", err);
            (StatusCode::SERVICE_UNAVAILABLE, "down")
        }
        Err(_) => {
            tracing::warn!("readiness query timed out after {:?}", DB_CHECK_TIMEOUT);
            (StatusCode::SERVICE_UNAVAILABLE, "down")
        }
    };

    let status = if code == StatusCode::OK { "ok" } else { "degraded" };
    (
        code,
        Json(json!({
            "status": status,
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
        })),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(liveness))
        .route("/health/db", get(readiness))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn liveness_reports_version() {
        let Json(body) = liveness().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
