//! Credit quota configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Trial credit settings applied to new accounts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreditsConfig {
    /// Credits granted to a regular account at registration
    #[serde(default = "default_trial_credits")]
    pub default_trial_credits: i64,

    /// Value reported as "remaining" for privileged accounts
    #[serde(default = "default_unlimited_sentinel")]
    pub unlimited_sentinel: i64,
}

impl Default for CreditsConfig {
    fn default() -> Self {
        Self {
            default_trial_credits: default_trial_credits(),
            unlimited_sentinel: default_unlimited_sentinel(),
        }
    }
}

impl CreditsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_trial_credits: env_or("DEFAULT_TRIAL_CREDITS", defaults.default_trial_credits),
            unlimited_sentinel: defaults.unlimited_sentinel,
        }
    }
}

fn default_trial_credits() -> i64 {
    5
}

fn default_unlimited_sentinel() -> i64 {
    999_999
}
