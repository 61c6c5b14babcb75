//! Outbound email (SMTP) configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// SMTP relay configuration used to deliver verification codes
#[derive(Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// Relay host name
    pub host: String,

    /// Relay port (465 = implicit TLS)
    pub port: u16,

    /// Login user name, also used as the sender address
    pub username: String,

    /// Login password
    #[serde(skip_serializing)]
    pub password: String,

    /// Display name for the `From` header
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Per-message timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("sender_name", &self.sender_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("smtppro.zoho.com"),
            port: 465,
            username: String::new(),
            password: String::new(),
            sender_name: default_sender_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SmtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SMTP_HOST").unwrap_or(defaults.host),
            port: env_or("SMTP_PORT", defaults.port),
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            sender_name: std::env::var("SMTP_SENDER_NAME").unwrap_or(defaults.sender_name),
            timeout_secs: env_or("SMTP_TIMEOUT_SECS", defaults.timeout_secs),
        }
    }

    /// Whether credentials are present
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }
}

fn default_sender_name() -> String {
    String::from("Joyful System")
}

fn default_timeout_secs() -> u64 {
    30
}
