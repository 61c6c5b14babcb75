//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - Account balance repository with transactional consumption

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::MySqlAccountRepository;
