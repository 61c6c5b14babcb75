//! Domain entities representing core business objects.

pub mod account;
pub mod job;
pub mod verification_entry;


// Re-export commonly used types
pub use account::{
    Account, AccountId, AccountRole, ConsumeOutcome, CreditBalance, UsageKind, UsageRecord,
    DEFAULT_TRIAL_CREDITS, UNLIMITED_CREDITS,
};
pub use job::{Artifact, JobState};
pub use verification_entry::{VerificationEntry, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};
