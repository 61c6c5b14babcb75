//! Typed failures for the job, credit and verification services
//!
//! Every variant maps onto a stable error code from [`jf_shared::error_codes`]
//! so the presentation layer can translate it without string matching.

use jf_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

use crate::domain::entities::AccountId;

/// Job orchestration failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("Invalid generation request: {message}")]
    InvalidRequest { message: String },

    #[error("Job submission failed: {message}")]
    SubmissionFailed {
        message: String,
        code: Option<String>,
        status_code: Option<u16>,
    },

    #[error("Job {job_id} did not complete: {message}")]
    CompletionFailed {
        job_id: String,
        message: String,
        code: Option<String>,
        status_code: Option<u16>,
    },

    #[error("Unknown or expired job: {job_id}")]
    UnknownJob { job_id: String },

    #[error("Status of job {job_id} unavailable: {message}")]
    StatusUnavailable {
        job_id: String,
        message: String,
        status_code: Option<u16>,
    },
}

impl JobError {
    pub fn code(&self) -> &'static str {
        match self {
            JobError::InvalidRequest { .. } => error_codes::INVALID_REQUEST,
            JobError::SubmissionFailed { .. } => error_codes::SUBMISSION_FAILED,
            JobError::CompletionFailed { .. } => error_codes::COMPLETION_FAILED,
            JobError::UnknownJob { .. } => error_codes::UNKNOWN_JOB,
            JobError::StatusUnavailable { .. } => error_codes::STATUS_UNAVAILABLE,
        }
    }

    /// HTTP status reported by the provider, if any
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            JobError::SubmissionFailed { status_code, .. }
            | JobError::CompletionFailed { status_code, .. }
            | JobError::StatusUnavailable { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

impl IntoErrorResponse for JobError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.code(), self.to_string());
        match self {
            JobError::SubmissionFailed { code, status_code, .. }
            | JobError::CompletionFailed { code, status_code, .. } => {
                let response = match code {
                    Some(code) => response.add_detail("provider_code", code),
                    None => response,
                };
                match status_code {
                    Some(status) => response.add_detail("status_code", status),
                    None => response,
                }
            }
            JobError::UnknownJob { job_id } => response.add_detail("job_id", job_id),
            JobError::StatusUnavailable {
                job_id, status_code, ..
            } => {
                let response = response.add_detail("job_id", job_id);
                match status_code {
                    Some(status) => response.add_detail("status_code", status),
                    None => response,
                }
            }
            JobError::InvalidRequest { .. } => response,
        }
    }
}

impl From<JobError> for ErrorResponse {
    fn from(err: JobError) -> Self {
        err.to_error_response()
    }
}

/// Credit ledger failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreditError {
    #[error("Account not found: {account_id}")]
    AccountNotFound { account_id: AccountId },

    #[error("Trial credits exhausted for account {account_id}")]
    QuotaExhausted { account_id: AccountId },

    #[error("Credit ledger unavailable: {message}")]
    LedgerUnavailable { message: String },
}

impl CreditError {
    pub fn code(&self) -> &'static str {
        match self {
            CreditError::AccountNotFound { .. } => error_codes::ACCOUNT_NOT_FOUND,
            CreditError::QuotaExhausted { .. } => error_codes::QUOTA_EXHAUSTED,
            CreditError::LedgerUnavailable { .. } => error_codes::LEDGER_UNAVAILABLE,
        }
    }
}

impl IntoErrorResponse for CreditError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.code(), self.to_string());
        match self {
            CreditError::QuotaExhausted { .. } => response.add_detail("remaining", 0),
            _ => response,
        }
    }
}

impl From<CreditError> for ErrorResponse {
    fn from(err: CreditError) -> Self {
        err.to_error_response()
    }
}

/// Email verification failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Invalid email address: {identity}")]
    InvalidIdentity { identity: String },

    #[error("Please wait {retry_after_seconds} seconds before requesting a new code")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Failed to send verification email")]
    SendFailed,

    #[error("Verification code not found. Please request a new one")]
    NotFound,

    #[error("Verification code expired. Please request a new one")]
    Expired,

    #[error("Too many failed attempts. Please request a new code")]
    TooManyAttempts,

    #[error("Invalid verification code, {remaining_attempts} attempts remaining")]
    Invalid { remaining_attempts: u32 },
}

impl VerificationError {
    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::InvalidIdentity { .. } => error_codes::INVALID_IDENTITY,
            VerificationError::RateLimited { .. } => error_codes::RATE_LIMITED,
            VerificationError::SendFailed => error_codes::SEND_FAILED,
            VerificationError::NotFound => error_codes::CODE_NOT_FOUND,
            VerificationError::Expired => error_codes::CODE_EXPIRED,
            VerificationError::TooManyAttempts => error_codes::TOO_MANY_ATTEMPTS,
            VerificationError::Invalid { .. } => error_codes::INVALID_CODE,
        }
    }
}

impl IntoErrorResponse for VerificationError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.code(), self.to_string());
        match self {
            VerificationError::RateLimited { retry_after_seconds } => {
                response.add_detail("retry_after_seconds", retry_after_seconds)
            }
            VerificationError::Invalid { remaining_attempts } => {
                response.add_detail("remaining_attempts", remaining_attempts)
            }
            _ => response,
        }
    }
}

impl From<VerificationError> for ErrorResponse {
    fn from(err: VerificationError) -> Self {
        err.to_error_response()
    }
}
