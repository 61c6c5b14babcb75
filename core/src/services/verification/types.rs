//! Types for verification service results

use serde::{Deserialize, Serialize};

/// Result of issuing a verification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueResult {
    /// Whether the code was delivered
    pub sent: bool,
    /// Normalized address the code was sent to
    pub identity: String,
    /// Minutes until the code expires
    pub expires_in_minutes: u64,
    /// Seconds before another code may be requested
    pub resend_after_seconds: u64,
}

/// Result of verifying a code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResult {
    pub success: bool,
}

/// Snapshot of a live verification entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationStatus {
    pub expires_in_seconds: u64,
    pub attempts_used: u32,
    pub max_attempts: u32,
}
