use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no activity at position {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoerceError {
    #[error("scale must be an integer or null, got {0}")]
    Scale(String),

    #[error("activity must be text, got {0}")]
    Activity(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Could not parse YAML: {0}")]
    Parse(String),

    #[error("Invalid YAML format! Expected a list of activities, found {0}")]
    NotASequence(&'static str),

    #[error("Invalid YAML format! Entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Could not write YAML: {0}")]
    Emit(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::not_found(err.to_string())
    }
}

impl From<CoerceError> for AppError {
    fn from(err: CoerceError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<FormatError> for AppError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Emit(_) => Self::internal(err),
            _ => Self::bad_request(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
