use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use portfolio_shared::contact::{ErrorResponse, ValidationError};
use thiserror::Error;

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const INTERNAL_ERROR: &str = "An unexpected error occurred. Please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Rejected request ({0}): {1}")]
    Request(StatusCode, String),

    #[error("Validation error: {}", portfolio_shared::contact::describe(.0))]
    Validation(Vec<ValidationError>),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<portfolio_shared::Error> for AppError {
    fn from(err: portfolio_shared::Error) -> Self {
        match err {
            portfolio_shared::Error::Validate(errors) => AppError::Validation(errors),
            portfolio_shared::Error::Server(msg) => AppError::Internal(msg),
            portfolio_shared::Error::Unknown(e) => AppError::Internal(format!("{e:#}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message, errors) = match self {
            AppError::Request(status, msg) => (status, msg, vec![]),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                VALIDATION_FAILED.to_string(),
                errors,
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR.to_string(),
                    vec![],
                )
            }
        };

        (status_code, Json(ErrorResponse { message, errors })).into_response()
    }
}
