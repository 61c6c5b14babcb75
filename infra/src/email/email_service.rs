//! Email Service Interface

use async_trait::async_trait;

use jf_core::services::verification::VerificationMessage;

use crate::InfrastructureError;

/// Outbound email transport
///
/// Implementations include:
/// - SMTP relay via lettre
/// - Mock implementation for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Deliver `message` to `recipient`
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier or server reply for the sent message
    /// * `Err(InfrastructureError)` - If building or sending fails
    async fn send_email(&self, recipient: &str, message: &VerificationMessage) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}
