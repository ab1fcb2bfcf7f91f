// API error type and its JSON response body
use crate::application::document_store::StoreError;
use crate::application::view_router::ActionError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("Internal error")]
    Internal,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Action(action) => match action {
                ActionError::NotInitialized => (StatusCode::SERVICE_UNAVAILABLE, "NOT_INITIALIZED"),
                ActionError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
                ActionError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                ActionError::NothingToExport => (StatusCode::NOT_FOUND, "NOTHING_TO_EXPORT"),
                ActionError::Store(StoreError::Missing { .. }) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                ActionError::Store(_) => (StatusCode::BAD_GATEWAY, "STORE_ERROR"),
                ActionError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error_code = code, error_message = %self, "API error occurred");
        } else {
            tracing::warn!(error_code = code, error_message = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
