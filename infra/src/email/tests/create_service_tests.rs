use jf_core::services::verification::NotificationSender;
use jf_shared::SmtpConfig;

use crate::email::{create_email_service, create_notification_sender};

#[test]
fn test_unconfigured_smtp_uses_mock() {
    let service = create_email_service(&SmtpConfig::default());
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_configured_smtp_uses_relay() {
    let config = SmtpConfig {
        host: "smtp.example.com".to_string(),
        username: "system@joyful.cloud".to_string(),
        password: "app-password".to_string(),
        ..Default::default()
    };
    let service = create_email_service(&config);
    assert_eq!(service.provider_name(), "SMTP");
}

#[test]
fn test_broken_smtp_config_falls_back_to_mock() {
    let config = SmtpConfig {
        host: "smtp.example.com".to_string(),
        username: "no-at-sign".to_string(),
        password: "app-password".to_string(),
        ..Default::default()
    };
    let service = create_email_service(&config);
    assert_eq!(service.provider_name(), "Mock");
}

#[tokio::test]
async fn test_notification_sender_over_mock_succeeds() {
    let sender = create_notification_sender(&SmtpConfig::default(), 10);
    assert!(sender.dispatch("user@example.com", "123456").await);
}
