use axum::{
    extract::rejection::{BytesRejection, JsonRejection, PathRejection},
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;
use thiserror::Error;

/// Failures of the column summarization pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("Dataset has no columns")]
    EmptyDataset,
    #[error("Row {row} has a non-scalar value in column '{column}'")]
    MalformedRow { row: usize, column: String },
    #[error("Column '{name}' is listed more than once")]
    DuplicateColumn { name: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("File processing error: {0}")]
    FileProcessingError(String),
    #[error("File too large: {size} bytes (max {max})")]
    FileTooLarge { size: usize, max: usize },
    #[error("Download error: {0}")]
    DownloadError(String),
    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),
    #[error("No File Uploaded yet")]
    NotLoaded,
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected { status: rejection.status(), message: rejection.body_text() }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected { status: rejection.status(), message: rejection.body_text() }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Rejected { status: rejection.status(), message: rejection.body_text() }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<calamine::Error> for AppError {
    fn from(err: calamine::Error) -> Self {
        AppError::FileProcessingError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::ParseError(_) => StatusCode::BAD_REQUEST,
            AppError::FileProcessingError(_) | AppError::Summary(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::DownloadError(_) => StatusCode::BAD_GATEWAY,
            AppError::NotLoaded => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
