//! How failures of the catalog are reported to HTTP clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{debug, error};
use songbook_storage::errors::Error as StorageError;
use songbook_types::{Envelope, ValidationError};
use thiserror::Error;

pub const INVALID_ID_FORMAT: &str = "INVALID_ID_FORMAT";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The id in the path is not one the store could have handed out.
    #[error("Malformed id: {0}")]
    InvalidId(String),
    /// The request body could not be read, or failed normalization.
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Song not found")]
    NotFound,
    #[error("A song titled \"{0}\" already exists")]
    Conflict(String),
    /// The store failed, the details are only logged.
    #[error("Storage error: {0}")]
    Upstream(#[source] StorageError),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message put in the envelope sent back to the client.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => INVALID_ID_FORMAT,
            Self::Validation(_) => VALIDATION_FAILED,
            Self::NotFound => NOT_FOUND,
            Self::Conflict(_) => ALREADY_EXISTS,
            Self::Upstream(_) => INTERNAL_ERROR,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => Self::NotFound,
            StorageError::InvalidId(id) => Self::InvalidId(id),
            StorageError::AlreadyExists(title) => Self::Conflict(title),
            e @ (StorageError::DbError(_) | StorageError::NotCreated(_)) => Self::Upstream(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::InvalidId(id) => Self::InvalidId(id),
            e @ ValidationError::EmptyTitle => Self::Validation(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Upstream(e) = &self {
            error!("Request failed: {e}");
        } else {
            debug!("Request rejected: {self}");
        }

        (self.status(), Json(Envelope::<()>::error(self.message()))).into_response()
    }
}
