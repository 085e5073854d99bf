use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use sqlx::SqlitePool;

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Ready once the store answers and the submission table is migrated.
pub async fn ready(State(pool): State<SqlitePool>) -> (StatusCode, Json<Value>) {
    let probe = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'contact_submission'",
    )
    .fetch_one(&pool)
    .await;

    let reason = match probe {
        Ok(1) => return (StatusCode::OK, Json(json!({"status": "ready"}))),
        Ok(_) => "migrations_pending",
        Err(e) => {
            tracing::error!("Readiness check failed: {e}");
            "database_unavailable"
        }
    };

    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"status": "not_ready", "reason": reason})),
    )
}
