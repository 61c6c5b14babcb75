//! Email Module
//!
//! Delivery of verification codes by email:
//!
//! - **Email Service Trait**: common interface for mail transports
//! - **SMTP**: authenticated relay via lettre (implicit TLS on 465)
//! - **Mock Implementation**: records messages for development and tests
//! - **Notification Adapter**: bridges a transport to the core `NotificationSender`

use std::sync::Arc;

use jf_core::services::verification::NotificationSender;
use jf_shared::SmtpConfig;

pub mod email_service;
pub mod mock_email;
pub mod notification_adapter;
pub mod smtp;

pub use email_service::EmailService;
pub use mock_email::{MockEmailSender, SentEmail};
pub use notification_adapter::EmailNotificationSender;
pub use smtp::SmtpEmailSender;

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// Falls back to [`MockEmailSender`] when SMTP credentials are missing or the
/// transport cannot be built.
pub fn create_email_service(config: &SmtpConfig) -> Arc<dyn EmailService> {
    if !config.is_configured() {
        tracing::warn!("SMTP credentials not configured, using mock email service");
        return Arc::new(MockEmailSender::new());
    }

    match SmtpEmailSender::new(config) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize SMTP email service");
            tracing::warn!("Falling back to mock email service");
            Arc::new(MockEmailSender::new())
        }
    }
}

/// Create the verification code sender for `config`
pub fn create_notification_sender(config: &SmtpConfig, expiry_minutes: u64) -> Arc<dyn NotificationSender> {
    Arc::new(EmailNotificationSender::new(
        create_email_service(config),
        expiry_minutes,
    ))
}
