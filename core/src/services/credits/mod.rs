//! Credit ledger gating paid operations on a per-account trial balance

mod service;
mod types;


pub use service::CreditLedger;
pub use types::{ConsumeResult, CreditStatus};
