//! Health check endpoint

use axum::Json;
use axum::extract::State;
use http::StatusCode;

use crate::state::AppState;

/// Liveness plus a round trip to the local order store
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let started = std::time::Instant::now();
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => serde_json::json!({
            "status": "ok",
            "latency_ms": started.elapsed().as_millis() as u64,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "order store health check failed");
            serde_json::json!({ "status": "error", "message": e.to_string() })
        }
    };

    let healthy = database["status"] == "ok";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "status": if healthy { "ok" } else { "degraded" },
            "service": "order-service",
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
        })),
    )
}
