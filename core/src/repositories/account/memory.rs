//! In-memory implementation of AccountRepository for development and tests

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::entities::account::{
    Account, AccountId, ConsumeOutcome, CreditBalance, UsageKind, UsageRecord,
};
use crate::errors::DomainError;

use super::trait_::AccountRepository;

#[derive(Default)]
struct Store {
    accounts: HashMap<AccountId, Account>,
    usage: Vec<UsageRecord>,
}

/// Account repository backed by a single mutex over a map
#[derive(Default)]
pub struct InMemoryAccountRepository {
    store: Mutex<Store>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with accounts
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let store = Store {
            accounts: accounts.into_iter().map(|a| (a.id, a)).collect(),
            usage: Vec::new(),
        };
        Self {
            store: Mutex::new(store),
        }
    }

    /// Insert or replace an account
    pub async fn insert(&self, account: Account) {
        self.store.lock().await.accounts.insert(account.id, account);
    }

    pub async fn get(&self, account_id: AccountId) -> Option<Account> {
        self.store.lock().await.accounts.get(&account_id).cloned()
    }

    /// Usage records in insertion order
    pub async fn usage_records(&self) -> Vec<UsageRecord> {
        self.store.lock().await.usage.clone()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_credit_balance(
        &self,
        account_id: AccountId,
    ) -> Result<Option<CreditBalance>, DomainError> {
        let store = self.store.lock().await;
        Ok(store.accounts.get(&account_id).map(Account::balance))
    }

    async fn consume_credit(
        &self,
        account_id: AccountId,
        kind: &UsageKind,
    ) -> Result<Option<ConsumeOutcome>, DomainError> {
        let mut store = self.store.lock().await;
        let Some(account) = store.accounts.get_mut(&account_id) else {
            return Ok(None);
        };

        let outcome = account.consume();
        if let ConsumeOutcome::Consumed { .. } = outcome {
            store.usage.push(UsageRecord::new(account_id, kind.clone()));
        }
        Ok(Some(outcome))
    }
}
