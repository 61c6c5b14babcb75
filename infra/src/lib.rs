//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborator traits declared in `jf_core`:
//!
//! - **Database**: MySQL account repository using SQLx
//! - **Generation**: DashScope image synthesis client and artifact downloader
//! - **Email**: SMTP delivery of verification codes via lettre
//! - **Telemetry**: tracing subscriber set up from the shared logging config

// Re-export core types for convenience
pub use jf_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email module - verification code delivery
pub mod email;

/// Generation module - remote image synthesis over HTTP
pub mod generation;

/// Telemetry module - tracing subscriber initialisation
pub mod telemetry;

use std::path::{Path, PathBuf};

use jf_shared::{AppConfig, Environment};

/// Load application configuration from the environment
///
/// The environment-specific file (`.env.production` and so on) in the working
/// directory is applied first, then `.env`. Variables already set win.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    apply_env_files(Path::new("."), Environment::from_env());

    let config = AppConfig::from_env();
    if config.database.url.trim().is_empty() {
        return Err(InfrastructureError::Config(
            "DATABASE_URL must not be empty".to_string(),
        ));
    }

    tracing::debug!(
        environment = %config.environment,
        smtp_configured = config.smtp.is_configured(),
        generation_configured = config.generation.is_configured(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Apply the env files for `environment` found in `dir`
///
/// Returns the files that were read, in the order they were applied.
pub fn apply_env_files(dir: &Path, environment: Environment) -> Vec<PathBuf> {
    [dir.join(environment.env_file()), dir.join(".env")]
        .into_iter()
        .filter(|path| dotenvy::from_path(path).is_ok())
        .collect()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// SMTP transport error
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Malformed email address
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Email could not be assembled
    #[error("Email build error: {0}")]
    Email(#[from] lettre::error::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_file_applied_before_dotenv() {
        let dir = std::env::temp_dir().join(format!("jf_infra_env_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(".env.staging"), "JF_INFRA_ENV_TEST_KEY=staging\n").unwrap();
        std::fs::write(dir.join(".env"), "JF_INFRA_ENV_TEST_KEY=base\n").unwrap();

        let applied = apply_env_files(&dir, Environment::Staging);

        assert_eq!(applied, vec![dir.join(".env.staging"), dir.join(".env")]);
        assert_eq!(std::env::var("JF_INFRA_ENV_TEST_KEY").unwrap(), "staging");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_env_files_are_skipped() {
        let dir = std::env::temp_dir().join("jf_infra_env_missing");
        assert!(apply_env_files(&dir, Environment::Production).is_empty());
    }
}
