use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::IntoResponse,
};
use portfolio_shared::contact::{ContactInput, SubmitResponse};
use serde_json::Value;

use crate::{error::AppError, routes::AppState};

/// POST /api/contact
///
/// The body is read as raw bytes so that every failure (oversized, not JSON,
/// wrong shape) still answers with the structured error body.
pub async fn action(
    State(app_state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body.map_err(|rejection| AppError::Request(rejection.status(), rejection.body_text()))?;
    let input = parse_input(&body)?;

    let receipt = app_state.contact_command.submit_form(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: receipt.message,
        }),
    ))
}

fn parse_input(body: &[u8]) -> Result<ContactInput, AppError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        AppError::Request(StatusCode::BAD_REQUEST, format!("Malformed JSON body: {e}"))
    })?;

    if !value.is_object() {
        return Err(AppError::Request(
            StatusCode::BAD_REQUEST,
            "Expected a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        AppError::Request(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Invalid contact fields: {e}"),
        )
    })
}

pub async fn not_found() -> AppError {
    AppError::Request(StatusCode::NOT_FOUND, "Not found".to_string())
}
