use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{db::DbError, openapi::ErrorResponse};

/// Errors returned by the HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Conflict(String),
    /// A field failed validation. `param` names the field when known.
    Validation {
        message: String,
        param: Option<String>,
    },
    BadRequest(String),
    /// The server was started without a `[database]` section.
    DatabaseRequired,
    Database(DbError),
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            param: None,
        }
    }

    /// Map a store error for a single tool, naming the tool when it is missing.
    pub fn for_tool(id: i32) -> impl FnOnce(DbError) -> ApiError {
        move |err| match err {
            DbError::NotFound => ApiError::NotFound(format!("Tool with ID {} does not exist", id)),
            other => other.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            DbError::Conflict(msg) => ApiError::Conflict(msg),
            DbError::Validation(msg) => ApiError::validation(msg),
            DbError::NotConfigured => ApiError::DatabaseRequired,
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new("not_found", msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new("conflict", msg)),
            ApiError::Validation {
                message,
                param: Some(param),
            } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_param("validation_error", message, param),
            ),
            ApiError::Validation {
                message,
                param: None,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("validation_error", message),
            ),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new("bad_request", msg))
            }
            ApiError::DatabaseRequired => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::with_type(
                    "server_error",
                    "not_configured",
                    "This endpoint requires a database. Add a [database] section to the configuration.",
                ),
            ),
            ApiError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_type(
                        "server_error",
                        "internal_error",
                        "An internal database error occurred",
                    ),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_type(
                        "server_error",
                        "internal_error",
                        "An internal error occurred",
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
