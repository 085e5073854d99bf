use axum::{Router, extract::DefaultBodyLimit, routing::get, routing::post};
use portfolio_shared::contact::CONTACT_PATH;
use sqlx::SqlitePool;

pub mod contact;
mod health;

/// Contact bodies are four short strings, anything larger is rejected.
pub const CONTACT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub contact_command: portfolio_contact::Command,
}

pub fn router(app_state: AppState, pool: SqlitePool) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(pool)
        .route(
            CONTACT_PATH,
            post(contact::action).layer(DefaultBodyLimit::max(CONTACT_BODY_LIMIT)),
        )
        .fallback(contact::not_found)
        .with_state(app_state)
}
