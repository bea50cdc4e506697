//! HTTP error responses
//!
//! The only place a domain error turns into a status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use swdialer::DomainError;
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request could not be read at all
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Configuration(_))
            | ApiError::Domain(DomainError::Upstream { .. })
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Domain(DomainError::Validation(msg)) => msg.clone(),
            ApiError::Domain(DomainError::NotFound { entity_type, .. }) => {
                format!("{} not found", entity_type)
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = ErrorResponse {
            success: false,
            error: self.message(),
        };

        (status, Json(body)).into_response()
    }
}
