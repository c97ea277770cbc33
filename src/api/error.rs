//! Translation of service failures into HTTP responses.

use crate::task::services::TaskLifecycleError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Error payload returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable error kind.
    pub code: String,
    /// Reason text safe to show to users.
    pub detail: String,
}

/// Errors produced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was malformed before reaching the service.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The service rejected the request.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
}

impl ApiError {
    /// Returns the status code, error kind and user-facing reason.
    #[must_use]
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, "validation_error", reason.clone())
            }
            Self::Lifecycle(err) => lifecycle_parts(err),
        }
    }
}

fn lifecycle_parts(err: &TaskLifecycleError) -> (StatusCode, &'static str, String) {
    match err {
        TaskLifecycleError::Validation(domain) => (
            StatusCode::BAD_REQUEST,
            "validation_error",
            domain.to_string(),
        ),
        TaskLifecycleError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            "not_found",
            "task not found".to_owned(),
        ),
        TaskLifecycleError::PreconditionFailed(precondition) => (
            StatusCode::BAD_REQUEST,
            "precondition_failed",
            precondition.reason().to_owned(),
        ),
        TaskLifecycleError::AnalysisFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "analysis_failed",
            "failed to analyze task with AI".to_owned(),
        ),
        TaskLifecycleError::StorageUnavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "storage_unavailable",
            "task storage unavailable".to_owned(),
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            Self::Lifecycle(TaskLifecycleError::StorageUnavailable(_))
        ) {
            error!(error = %self, "task storage failure");
        }
        let (status, code, detail) = self.parts();
        let body = ErrorBody {
            code: code.to_owned(),
            detail,
        };
        (status, Json(body)).into_response()
    }
}
