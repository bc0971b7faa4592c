use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use redacao_store::StoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Error type for the HTTP surface. Everything renders as
/// `{ "error": <message> }` with the matching status.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Não autenticado.")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self, "Internal server error");
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => ApiError::NotFound(format!("Não encontrado: {what}")),
            StoreError::AlreadyExists(what) => {
                ApiError::BadRequest(format!("Já cadastrado: {what}"))
            }
            StoreError::InvalidCredentials => ApiError::Unauthorized,
            StoreError::StorageError(msg) => ApiError::Internal(msg),
        }
    }
}
