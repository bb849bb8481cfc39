use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error type that can be returned from handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Authentication credentials were not provided")]
    Unauthorized,

    #[error("No active account found with the given credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    // Client input errors
    #[error("{0}")]
    BadRequest(String),

    /// Signup-style validation: one human-readable message per failing field
    #[error("validation failed")]
    FieldErrors(Vec<String>),

    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors; the message is what the client sees
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // 401 Unauthorized; "detail" is the key the auth layer has
            // always answered with
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({"detail": "Authentication credentials were not provided."}),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({"detail": "No active account found with the given credentials"}),
            ),
            AppError::InvalidToken | AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                json!({"detail": "Token is invalid or expired"}),
            ),

            // 400 Bad Request
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
            AppError::FieldErrors(msgs) => (StatusCode::BAD_REQUEST, json!({"message": msgs})),

            // 404 Not Found
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({"error": format!("{} not found", what)}),
            ),

            // 409 Conflict
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({"message": msg})),

            // 500 Internal Server Error
            AppError::Database(detail) => {
                tracing::error!("Database error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Database error"}),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({"error": msg}))
            }
        };

        (status, Json(body)).into_response()
    }
}

// Convenient conversions from common error types

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::RecordNotFound(what) => AppError::NotFound(what),
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::Internal(format!("Password hash error: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
