//! MySQL implementation of the AccountRepository trait.
//!
//! Balances live in the `users.demo_count` column; every successful
//! decrement appends a row to `usage_logs` inside the same transaction.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use jf_core::domain::entities::account::{AccountId, AccountRole, ConsumeOutcome, CreditBalance, UsageKind};
use jf_core::errors::DomainError;
use jf_core::repositories::AccountRepository;
use jf_shared::CreditsConfig;

/// Schema for the tables this repository reads and writes
///
/// `{trial_credits}` is replaced with the balance granted to new rows.
const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INT AUTO_INCREMENT PRIMARY KEY,
        email VARCHAR(255) UNIQUE NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        role VARCHAR(20) NOT NULL DEFAULT 'user',
        demo_count INT NOT NULL DEFAULT {trial_credits},
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS usage_logs (
        id INT AUTO_INCREMENT PRIMARY KEY,
        user_id INT,
        demo_type VARCHAR(50) NOT NULL,
        used_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
];

/// Render [`SCHEMA`] with the given trial balance as the `demo_count` default
pub fn schema_statements(trial_credits: i64) -> Vec<String> {
    SCHEMA
        .iter()
        .map(|statement| statement.replace("{trial_credits}", &trial_credits.to_string()))
        .collect()
}

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
    /// Balance new `users` rows start with
    trial_credits: i64,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self::with_config(pool, &CreditsConfig::default())
    }

    pub fn with_config(pool: MySqlPool, config: &CreditsConfig) -> Self {
        Self {
            pool,
            trial_credits: config.default_trial_credits,
        }
    }

    /// Create the `users` and `usage_logs` tables if they are missing
    ///
    /// An existing `users` table keeps the default it was created with.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        for statement in schema_statements(self.trial_credits) {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::Internal { message: format!("Failed to create schema: {}", e) })?;
        }
        tracing::info!("Account schema is ready");
        Ok(())
    }

    /// Convert a `users` row into a balance snapshot
    fn row_to_balance(row: &sqlx::mysql::MySqlRow) -> Result<CreditBalance, DomainError> {
        let id: i32 = row.try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let role: String = row.try_get("role")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get role: {}", e) })?;

        let credits: i32 = row.try_get("demo_count")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get demo_count: {}", e) })?;

        Ok(CreditBalance {
            account_id: AccountId::from(id),
            role: role
                .parse::<AccountRole>()
                .map_err(|message| DomainError::Internal { message })?,
            credits: i64::from(credits),
        })
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_credit_balance(&self, account_id: AccountId) -> Result<Option<CreditBalance>, DomainError> {
        let row = sqlx::query("SELECT id, role, demo_count FROM users WHERE id = ?")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to load balance: {}", e) })?;

        row.as_ref().map(Self::row_to_balance).transpose()
    }

    async fn consume_credit(
        &self,
        account_id: AccountId,
        kind: &UsageKind,
    ) -> Result<Option<ConsumeOutcome>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to begin transaction: {}", e) })?;

        let row = sqlx::query("SELECT id, role, demo_count FROM users WHERE id = ? FOR UPDATE")
            .bind(account_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to lock account: {}", e) })?;

        let Some(row) = row else {
            return Ok(None);
        };
        let balance = Self::row_to_balance(&row)?;

        if balance.is_privileged() {
            return Ok(Some(ConsumeOutcome::Privileged));
        }
        if balance.credits <= 0 {
            return Ok(Some(ConsumeOutcome::Exhausted { remaining: balance.credits }));
        }

        sqlx::query("UPDATE users SET demo_count = demo_count - 1, updated_at = NOW() WHERE id = ?")
            .bind(account_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to decrement credits: {}", e) })?;

        sqlx::query("INSERT INTO usage_logs (user_id, demo_type, used_at) VALUES (?, ?, NOW())")
            .bind(account_id)
            .bind(kind.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to record usage: {}", e) })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to commit consumption: {}", e) })?;

        Ok(Some(ConsumeOutcome::Consumed { remaining: balance.credits - 1 }))
    }
}
