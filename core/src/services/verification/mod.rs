//! Verification store for email-based registration
//!
//! This module provides the volatile verification code workflow:
//! - Code generation and dispatch through a [`NotificationSender`]
//! - Per-address resend throttling
//! - Code verification with attempt tracking
//! - Periodic eviction of expired codes

mod config;
mod message;
mod service;
mod traits;
mod types;


pub use config::VerificationServiceConfig;
pub use message::{VerificationMessage, VERIFICATION_SUBJECT};
pub use service::VerificationService;
pub use traits::NotificationSender;
pub use types::{IssueResult, VerificationStatus, VerifyResult};
