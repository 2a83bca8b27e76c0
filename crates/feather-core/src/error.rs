//! Shared error type across feather crates.

use thiserror::Error;

use crate::status::{Status, StatusCode};

/// Shared result type.
pub type Result<T> = std::result::Result<T, FeatherError>;

/// Unified error type used by core and the ingest service.
#[derive(Debug, Error)]
pub enum FeatherError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("transport: {0}")]
    Transport(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl FeatherError {
    /// Map the error onto the status code a caller would observe.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FeatherError::BadRequest(_) | FeatherError::UnsupportedVersion => {
                StatusCode::InvalidArgument
            }
            FeatherError::Transport(_) => StatusCode::Unavailable,
            FeatherError::Internal(_) => StatusCode::Internal,
        }
    }

    /// Convert into a terminal call status carrying the error text.
    pub fn status(&self) -> Status {
        Status::new(self.status_code(), self.to_string())
    }
}

impl From<FeatherError> for Status {
    fn from(e: FeatherError) -> Self {
        e.status()
    }
}
