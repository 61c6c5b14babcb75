//! SMTP email delivery using lettre

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{error, info};

use jf_core::services::verification::VerificationMessage;
use jf_shared::email::mask_email;
use jf_shared::SmtpConfig;

use super::email_service::EmailService;
use crate::InfrastructureError;

/// Port on which the relay expects TLS from the first byte
const IMPLICIT_TLS_PORT: u16 = 465;

/// Sends mail through an authenticated SMTP relay
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpEmailSender {
    /// Build the transport and sender mailbox from configuration
    ///
    /// No connection is opened until the first message is sent.
    pub fn new(config: &SmtpConfig) -> Result<Self, InfrastructureError> {
        if !config.is_configured() {
            return Err(InfrastructureError::Config(
                "SMTP host, username and password are required".to_string(),
            ));
        }

        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        let address: Address = config.username.parse()?;
        let sender = Mailbox::new(Some(config.sender_name.clone()), address);

        Ok(Self { transport, sender })
    }

    pub fn sender(&self) -> &Mailbox {
        &self.sender
    }

    /// Assemble the multipart/alternative message for `recipient`
    pub fn build_message(&self, recipient: &str, message: &VerificationMessage) -> Result<Message, InfrastructureError> {
        let to: Address = recipient.parse()?;

        let email = Message::builder()
            .from(self.sender.clone())
            .to(Mailbox::new(None, to))
            .subject(message.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                message.text.clone(),
                message.html.clone(),
            ))?;
        Ok(email)
    }
}

#[async_trait]
impl EmailService for SmtpEmailSender {
    async fn send_email(&self, recipient: &str, message: &VerificationMessage) -> Result<String, InfrastructureError> {
        let email = self.build_message(recipient, message)?;

        let response = self.transport.send(email).await.map_err(|e| {
            error!(
                email = %mask_email(recipient),
                error = %e,
                event = "smtp_send_failed",
                "SMTP relay rejected the message"
            );
            InfrastructureError::Smtp(e)
        })?;

        let reply = response.message().collect::<Vec<_>>().join(" ");
        info!(
            email = %mask_email(recipient),
            code = %response.code(),
            event = "email_sent",
            "Email accepted by SMTP relay"
        );
        Ok(reply)
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }
}
