//! Account entity and the credit bookkeeping attached to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric account identifier as stored in the `users` table
pub type AccountId = i64;

/// Remaining-credit value reported for privileged accounts
pub const UNLIMITED_CREDITS: i64 = 999_999;

/// Credits granted to a regular account at registration
pub const DEFAULT_TRIAL_CREDITS: i64 = 5;

/// Role of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Regular account with a finite credit balance
    #[default]
    User,
    /// Privileged account, never charged
    Admin,
}

impl AccountRole {
    /// Whether this role bypasses credit accounting
    pub fn is_privileged(&self) -> bool {
        matches!(self, AccountRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::User => "user",
            AccountRole::Admin => "admin",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(AccountRole::User),
            "admin" => Ok(AccountRole::Admin),
            other => Err(format!("Unknown account role: {}", other)),
        }
    }
}

/// Registered account holding a trial credit balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Login name
    pub username: String,

    /// Verified email address
    pub email: String,

    /// Account role
    pub role: AccountRole,

    /// Remaining trial credits; meaningless for privileged accounts
    pub credits: i64,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last balance change
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a regular account with the given trial balance
    pub fn new(id: AccountId, username: impl Into<String>, email: impl Into<String>, credits: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: username.into(),
            email: email.into(),
            role: AccountRole::User,
            credits,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a privileged account
    pub fn admin(id: AccountId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            role: AccountRole::Admin,
            credits: UNLIMITED_CREDITS,
            ..Self::new(id, username, email, UNLIMITED_CREDITS)
        }
    }

    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }

    /// Snapshot of the balance as seen by the ledger
    pub fn balance(&self) -> CreditBalance {
        CreditBalance {
            account_id: self.id,
            role: self.role,
            credits: self.credits,
        }
    }

    /// Applies one unit of consumption to this account.
    ///
    /// Privileged accounts are left untouched. A regular account with no
    /// positive balance is not decremented.
    pub fn consume(&mut self) -> ConsumeOutcome {
        if self.is_privileged() {
            return ConsumeOutcome::Privileged;
        }
        if self.credits <= 0 {
            return ConsumeOutcome::Exhausted {
                remaining: self.credits,
            };
        }
        self.credits -= 1;
        self.updated_at = Utc::now();
        ConsumeOutcome::Consumed {
            remaining: self.credits,
        }
    }
}

/// Role and balance of an account, read without modification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBalance {
    pub account_id: AccountId,
    pub role: AccountRole,
    pub credits: i64,
}

impl CreditBalance {
    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }

    pub fn has_credits(&self) -> bool {
        self.is_privileged() || self.credits > 0
    }
}

/// Result of an atomic consume operation at the storage layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// One credit was deducted
    Consumed { remaining: i64 },
    /// Privileged account; nothing deducted
    Privileged,
    /// Balance was not positive; nothing deducted
    Exhausted { remaining: i64 },
}

/// Kind of consumption being charged
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    /// Text-to-image generation
    ImageGeneration,
    /// Any other labelled demo feature
    Other(String),
}

impl UsageKind {
    pub fn as_str(&self) -> &str {
        match self {
            UsageKind::ImageGeneration => "image_generation",
            UsageKind::Other(label) => label.as_str(),
        }
    }
}

impl fmt::Display for UsageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for UsageKind {
    fn from(value: &str) -> Self {
        match value {
            "image_generation" => UsageKind::ImageGeneration,
            other => UsageKind::Other(other.to_string()),
        }
    }
}

/// Append-only record of a successful regular-account consumption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub account_id: AccountId,
    pub kind: UsageKind,
    pub used_at: DateTime<Utc>,
}

impl UsageRecord {
    pub fn new(account_id: AccountId, kind: UsageKind) -> Self {
        Self {
            account_id,
            kind,
            used_at: Utc::now(),
        }
    }
}
