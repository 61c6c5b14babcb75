//! # Joyful Core
//!
//! Core business logic and domain layer for the Joyful backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.
//!
//! The three stateful services are:
//! - [`services::verification::VerificationService`] - volatile email verification codes
//! - [`services::credits::CreditLedger`] - per-account trial credit gate
//! - [`services::generation::JobOrchestrator`] - remote image synthesis jobs

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
