//! Configuration for the verification service

use std::time::Duration;

use jf_shared::VerificationConfig;

use crate::domain::entities::verification_entry::{CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of digits in a code
    pub code_length: usize,
    /// Lifetime of an issued code
    pub code_expiration: Duration,
    /// Wrong guesses tolerated per code
    pub max_attempts: u32,
    /// Minimum time between two sends to the same address
    pub resend_interval: Duration,
    /// Period of the background sweeper
    pub sweep_interval: Duration,
}

impl VerificationServiceConfig {
    /// Code lifetime in whole minutes, as shown to the recipient
    pub fn expiration_minutes(&self) -> u64 {
        self.code_expiration.as_secs() / 60
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            code_expiration: Duration::from_secs(DEFAULT_EXPIRATION_MINUTES * 60),
            max_attempts: MAX_ATTEMPTS,
            resend_interval: Duration::from_secs(60),
            sweep_interval: Duration::from_secs(300),
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_length: config.code_length,
            code_expiration: Duration::from_secs(config.code_expiry_minutes * 60),
            max_attempts: config.max_attempts,
            resend_interval: Duration::from_secs(config.resend_interval_seconds),
            sweep_interval: Duration::from_secs(config.sweep_interval_seconds),
        }
    }
}
