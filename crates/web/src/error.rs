//! Handler errors rendered as `{"error": "..."}` JSON bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A generator produced nothing to serve.
    #[error("No data available")]
    NoData,

    /// The request body could not be read as a table.
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// The table was readable but not convertible.
    #[error(transparent)]
    InvalidTable(#[from] insightdash_core::Error),
}

impl AppError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NoData => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidTable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Error body returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
