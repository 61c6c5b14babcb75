//! Email Notification Adapter
//!
//! Implements the core `NotificationSender` on top of an infrastructure
//! [`EmailService`], rendering the verification message on the way.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use jf_core::services::verification::{NotificationSender, VerificationMessage};
use jf_shared::email::{is_valid_email, mask_email};

use super::email_service::EmailService;

/// Adapter that delivers verification codes by email
pub struct EmailNotificationSender {
    inner: Arc<dyn EmailService>,
    expiry_minutes: u64,
}

impl EmailNotificationSender {
    /// `expiry_minutes` is the code lifetime quoted in the message body
    pub fn new(inner: Arc<dyn EmailService>, expiry_minutes: u64) -> Self {
        Self { inner, expiry_minutes }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl NotificationSender for EmailNotificationSender {
    async fn dispatch(&self, identity: &str, code: &str) -> bool {
        let masked = mask_email(identity);
        if !is_valid_email(identity) {
            warn!(email = %masked, event = "invalid_recipient", "Refusing to send code to malformed address");
            return false;
        }

        let message = VerificationMessage::render(code, self.expiry_minutes);
        match self.inner.send_email(identity, &message).await {
            Ok(message_id) => {
                info!(
                    email = %masked,
                    provider = self.inner.provider_name(),
                    message_id = %message_id,
                    event = "code_dispatched",
                    "Verification email sent"
                );
                true
            }
            Err(e) => {
                error!(
                    email = %masked,
                    provider = self.inner.provider_name(),
                    error = %e,
                    event = "code_dispatch_failed",
                    "Verification email could not be sent"
                );
                false
            }
        }
    }
}
