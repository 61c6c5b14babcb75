//! Verification code configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Settings for email verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Number of digits in a code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Minutes before an issued code expires
    #[serde(default = "default_expiry_minutes")]
    pub code_expiry_minutes: u64,

    /// Wrong guesses allowed per code
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Minimum seconds between two sends to the same address
    #[serde(default = "default_resend_interval")]
    pub resend_interval_seconds: u64,

    /// How often the background sweeper evicts expired codes
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            code_expiry_minutes: default_expiry_minutes(),
            max_attempts: default_max_attempts(),
            resend_interval_seconds: default_resend_interval(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_length: env_or("VERIFICATION_CODE_LENGTH", defaults.code_length),
            code_expiry_minutes: env_or("VERIFICATION_CODE_EXPIRY_MINUTES", defaults.code_expiry_minutes),
            max_attempts: env_or("VERIFICATION_MAX_ATTEMPTS", defaults.max_attempts),
            resend_interval_seconds: env_or(
                "VERIFICATION_RESEND_INTERVAL_SECONDS",
                defaults.resend_interval_seconds,
            ),
            sweep_interval_seconds: env_or(
                "VERIFICATION_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
        }
    }
}

fn default_code_length() -> usize {
    6
}

fn default_expiry_minutes() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_resend_interval() -> u64 {
    60
}

fn default_sweep_interval() -> u64 {
    300
}
