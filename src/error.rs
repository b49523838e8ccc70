//! Error types: store-level failures, formatting failures, and the HTTP error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures raised by a `CatalogStore` write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("question text already exists: {0}")]
    DuplicateQuestion(String),

    #[error("category type already exists: {0}")]
    DuplicateCategory(String),

    #[error("category {0} does not exist")]
    UnknownCategory(i64),

    #[error("question {0} does not exist")]
    UnknownQuestion(i64),

    #[error("validation failed: {0}")]
    Validation(String),
}

/// A record could not be shaped for the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("question {question_id} has no category reference")]
    MissingReference { question_id: i64 },
}

/// HTTP-facing error. Every variant renders the fixed
/// `{success:false, error, message}` body.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,

    #[error("resource not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("unprocessable")]
    Unprocessable,

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<FormatError> for ApiError {
    fn from(_: FormatError) -> Self {
        ApiError::Internal
    }
}
