//! Account repository trait defining the credit-balance persistence boundary.
//!
//! The ledger never reads and writes the balance in two steps. Every
//! deduction goes through [`AccountRepository::consume_credit`], which the
//! implementation must perform as one atomic read-modify-write.

use async_trait::async_trait;

use crate::domain::entities::account::{AccountId, ConsumeOutcome, CreditBalance, UsageKind};
use crate::errors::DomainError;

/// Repository trait for account credit operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Read the role and remaining credits of an account
    ///
    /// # Returns
    /// * `Ok(Some(CreditBalance))` - Account found
    /// * `Ok(None)` - No account with this id
    /// * `Err(DomainError)` - Storage failure
    async fn find_credit_balance(
        &self,
        account_id: AccountId,
    ) -> Result<Option<CreditBalance>, DomainError>;

    /// Atomically deduct one credit and append a usage record
    ///
    /// Privileged accounts are not decremented and get no usage record.
    /// A non-positive balance is left unchanged.
    ///
    /// # Returns
    /// * `Ok(Some(ConsumeOutcome))` - Account found, outcome of the attempt
    /// * `Ok(None)` - No account with this id
    /// * `Err(DomainError)` - Storage failure; nothing was changed
    async fn consume_credit(
        &self,
        account_id: AccountId,
        kind: &UsageKind,
    ) -> Result<Option<ConsumeOutcome>, DomainError>;
}
