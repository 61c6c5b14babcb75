//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use jf_shared::ErrorResponse;
pub use types::{CreditError, JobError, VerificationError};

use jf_shared::{error_codes, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Credit(#[from] CreditError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
            }
            DomainError::Job(err) => err.to_error_response(),
            DomainError::Credit(err) => err.to_error_response(),
            DomainError::Verification(err) => err.to_error_response(),
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        err.to_error_response()
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
