//! Credit ledger implementation

use std::collections::HashMap;
use std::sync::{Arc, Mutex as RegistryMutex};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use jf_shared::CreditsConfig;

use crate::domain::entities::account::{AccountId, ConsumeOutcome, UsageKind, UNLIMITED_CREDITS};
use crate::errors::{CreditError, DomainError};
use crate::repositories::AccountRepository;

use super::types::{ConsumeResult, CreditStatus};

/// Per-account credit gate
///
/// Calls for the same account are serialized through a per-account async
/// lock; the repository performs the read-modify-write itself, so the backing
/// store stays the single source of truth across processes.
pub struct CreditLedger<R: AccountRepository> {
    repository: Arc<R>,
    unlimited_sentinel: i64,
    locks: LockRegistry,
}

type LockRegistry = RegistryMutex<HashMap<AccountId, Arc<Mutex<()>>>>;

/// Handle on one account's lock; drops the registry entry when the last
/// holder goes away, including when the owning future is cancelled
struct LockLease<'a> {
    registry: &'a LockRegistry,
    account_id: AccountId,
    lock: Arc<Mutex<()>>,
}

impl Drop for LockLease<'_> {
    fn drop(&mut self) {
        let Ok(mut locks) = self.registry.lock() else {
            return;
        };
        // Only the registry and this lease remain: nobody is queued
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.account_id);
        }
    }
}

impl<R: AccountRepository> CreditLedger<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            unlimited_sentinel: UNLIMITED_CREDITS,
            locks: RegistryMutex::new(HashMap::new()),
        }
    }

    pub fn with_config(repository: Arc<R>, config: &CreditsConfig) -> Self {
        Self {
            unlimited_sentinel: config.unlimited_sentinel,
            ..Self::new(repository)
        }
    }

    /// Deduct one credit from `account_id` for `kind`
    ///
    /// # Returns
    ///
    /// * `Ok(ConsumeResult)` - Allowed; one credit deducted unless privileged
    /// * `Err(CreditError::AccountNotFound)` - No such account
    /// * `Err(CreditError::QuotaExhausted)` - Balance not positive; nothing changed
    /// * `Err(CreditError::LedgerUnavailable)` - Storage failure; nothing changed
    pub async fn check_and_consume(
        &self,
        account_id: AccountId,
        kind: UsageKind,
    ) -> Result<ConsumeResult, CreditError> {
        let lease = self.lease(account_id);
        let outcome = {
            let _guard = lease.lock.lock().await;
            self.repository.consume_credit(account_id, &kind).await
        };
        drop(lease);

        match outcome.map_err(|e| self.unavailable(account_id, e))? {
            Some(ConsumeOutcome::Consumed { remaining }) => {
                info!(
                    account_id = account_id,
                    usage = %kind,
                    remaining = remaining,
                    event = "credit_consumed",
                    "Consumed one trial credit"
                );
                Ok(ConsumeResult {
                    allowed: true,
                    remaining,
                    is_privileged: false,
                })
            }
            Some(ConsumeOutcome::Privileged) => {
                debug!(account_id = account_id, usage = %kind, "Privileged account, no credit consumed");
                Ok(ConsumeResult {
                    allowed: true,
                    remaining: self.unlimited_sentinel,
                    is_privileged: true,
                })
            }
            Some(ConsumeOutcome::Exhausted { .. }) => {
                warn!(
                    account_id = account_id,
                    usage = %kind,
                    event = "quota_exhausted",
                    "Trial credits exhausted"
                );
                Err(CreditError::QuotaExhausted { account_id })
            }
            None => Err(CreditError::AccountNotFound { account_id }),
        }
    }

    /// Read the current balance without consuming
    pub async fn peek_status(&self, account_id: AccountId) -> Result<CreditStatus, CreditError> {
        let balance = self
            .repository
            .find_credit_balance(account_id)
            .await
            .map_err(|e| self.unavailable(account_id, e))?
            .ok_or(CreditError::AccountNotFound { account_id })?;

        let remaining = if balance.is_privileged() {
            self.unlimited_sentinel
        } else {
            balance.credits
        };

        Ok(CreditStatus {
            has_credits: balance.has_credits(),
            remaining,
            is_privileged: balance.is_privileged(),
        })
    }

    fn lease(&self, account_id: AccountId) -> LockLease<'_> {
        let lock = match self.locks.lock() {
            Ok(mut locks) => Arc::clone(locks.entry(account_id).or_default()),
            // A poisoned registry still yields a lock, just an untracked one
            Err(poisoned) => Arc::clone(poisoned.into_inner().entry(account_id).or_default()),
        };
        LockLease {
            registry: &self.locks,
            account_id,
            lock,
        }
    }

    fn unavailable(&self, account_id: AccountId, err: DomainError) -> CreditError {
        error!(
            account_id = account_id,
            error = %err,
            event = "ledger_unavailable",
            "Credit ledger storage failure"
        );
        CreditError::LedgerUnavailable {
            message: err.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) async fn tracked_locks(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or_default()
    }
}
