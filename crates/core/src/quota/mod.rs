//! Per-owner admission quota.

mod ledger;
mod memory_ledger;
mod types;

pub use ledger::QuotaLedger;
pub use memory_ledger::InMemoryQuotaLedger;
pub use types::{QuotaError, QuotaToken, QuotaTokenId};
