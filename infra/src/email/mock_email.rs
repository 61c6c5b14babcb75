//! Mock Email Service Implementation
//!
//! Logs messages instead of sending them and keeps a copy of each for tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{info, warn};

use jf_core::services::verification::VerificationMessage;
use jf_shared::email::mask_email;

use super::email_service::EmailService;
use crate::InfrastructureError;

/// A message captured by [`MockEmailSender`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub message: VerificationMessage,
}

/// Email service for development and testing
#[derive(Default)]
pub struct MockEmailSender {
    sent: Mutex<Vec<SentEmail>>,
    simulate_failure: AtomicBool,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that rejects every message
    pub fn failing() -> Self {
        let sender = Self::new();
        sender.set_simulate_failure(true);
        sender
    }

    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Messages sent so far, oldest first
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn message_count(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or_default()
    }
}

#[async_trait]
impl EmailService for MockEmailSender {
    async fn send_email(&self, recipient: &str, message: &VerificationMessage) -> Result<String, InfrastructureError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(email = %mask_email(recipient), "Mock email service simulating failure");
            return Err(InfrastructureError::General(
                "Simulated email delivery failure".to_string(),
            ));
        }

        let mut sent = self
            .sent
            .lock()
            .map_err(|_| InfrastructureError::General("Mock mailbox poisoned".to_string()))?;
        sent.push(SentEmail {
            recipient: recipient.to_string(),
            message: message.clone(),
        });
        let message_id = format!("mock-{}", sent.len());

        info!(
            email = %mask_email(recipient),
            message_id = %message_id,
            subject = %message.subject,
            "Mock email recorded"
        );
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
