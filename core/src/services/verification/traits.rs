//! Trait for outbound code delivery

use async_trait::async_trait;

/// Delivers a verification code to an address
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send `code` to `identity`; any failure is reported as `false`
    async fn dispatch(&self, identity: &str, code: &str) -> bool;
}
