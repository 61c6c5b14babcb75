use jf_core::services::verification::VerificationMessage;
use jf_shared::SmtpConfig;

use crate::email::{EmailService, SmtpEmailSender};
use crate::InfrastructureError;

fn configured() -> SmtpConfig {
    SmtpConfig {
        host: "smtp.example.com".to_string(),
        port: 465,
        username: "system@joyful.cloud".to_string(),
        password: "app-password".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_requires_credentials() {
    let result = SmtpEmailSender::new(&SmtpConfig::default());
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_rejects_malformed_sender_address() {
    let config = SmtpConfig {
        username: "not-an-address".to_string(),
        ..configured()
    };
    let result = SmtpEmailSender::new(&config);
    assert!(matches!(result, Err(InfrastructureError::Address(_))));
}

#[test]
fn test_sender_uses_display_name() {
    let service = SmtpEmailSender::new(&configured()).unwrap();
    assert_eq!(service.sender().name.as_deref(), Some("Joyful System"));
    assert_eq!(service.sender().email.to_string(), "system@joyful.cloud");
    assert_eq!(service.provider_name(), "SMTP");
}

#[test]
fn test_message_is_multipart_alternative() {
    let service = SmtpEmailSender::new(&configured()).unwrap();
    let message = service
        .build_message("user@example.com", &VerificationMessage::render("482913", 10))
        .unwrap();

    let raw = String::from_utf8(message.formatted()).unwrap();
    assert!(raw.contains("Subject: Joyful Registration Service - Verification Code"));
    assert!(raw.contains("To: user@example.com"));
    assert!(raw.contains("multipart/alternative"));
    assert!(raw.contains("text/plain"));
    assert!(raw.contains("text/html"));
}

#[test]
fn test_message_rejects_malformed_recipient() {
    let service = SmtpEmailSender::new(&configured()).unwrap();
    let result = service.build_message("nobody", &VerificationMessage::render("482913", 10));
    assert!(matches!(result, Err(InfrastructureError::Address(_))));
}

#[test]
fn test_starttls_port_is_accepted() {
    let config = SmtpConfig {
        port: 587,
        ..configured()
    };
    assert!(SmtpEmailSender::new(&config).is_ok());
}
