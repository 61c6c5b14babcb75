//! Types for credit ledger results

use serde::{Deserialize, Serialize};

/// Result of a successful check-and-consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeResult {
    pub allowed: bool,
    /// Balance after the deduction, or the unlimited sentinel
    pub remaining: i64,
    pub is_privileged: bool,
}

/// Read-only view of an account's credits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditStatus {
    pub has_credits: bool,
    pub remaining: i64,
    pub is_privileged: bool,
}
