use altis_core::{CoreError, RepositoryError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    NotFoundError(String),
    /// The database could not be reached. Reported as a client-visible 400.
    DatabaseUnavailable(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFoundError(msg) => {
                tracing::debug!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, json!({ "code": 404, "data": {} }))
            }
            AppError::DatabaseUnavailable(msg) => {
                tracing::error!("Database unavailable: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "code": 400, "errors": "could not connect to db" }),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "code": 500, "errors": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unavailable(msg) => Self::DatabaseUnavailable(msg),
            RepositoryError::Query(msg) => Self::InternalServerError(msg),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::InternalServerError(err.to_string())
    }
}
