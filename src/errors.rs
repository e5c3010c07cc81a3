use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::menu::UploadStats;

/// Central API error type. Everything here is recoverable by user retry;
/// local state is never left half-mutated (mutations happen under the
/// store's write lock before any of these surface).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input, caught before any state change.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    /// The one-vote-per-item gate: a second vote on the same food from
    /// the same user, in either direction, is rejected.
    #[error("You have already voted on this item")]
    AlreadyVoted,

    /// Voting and commenting are only open for today's menu.
    #[error("Feedback is only available for today's menu")]
    ViewOnly,

    /// Menu upload with zero recognizable days. Carries the parse detail
    /// so the caller sees how close the file came.
    #[error("{message}")]
    UploadRejected {
        message: String,
        warnings: Vec<String>,
        stats: UploadStats,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::AlreadyVoted => StatusCode::CONFLICT,
            ApiError::ViewOnly => StatusCode::FORBIDDEN,
            ApiError::UploadRejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::AlreadyVoted => "already_voted",
            ApiError::ViewOnly => "view_only",
            ApiError::UploadRejected { .. } => "upload_rejected",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            ApiError::UploadRejected {
                message,
                warnings,
                stats,
            } => json!({
                "success": false,
                "code": self.code(),
                "error": message,
                "warnings": warnings,
                "stats": stats,
            }),
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {e:#}");
                json!({
                    "success": false,
                    "code": self.code(),
                    "error": "Internal server error",
                })
            }
            other => json!({
                "success": false,
                "code": other.code(),
                "error": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
