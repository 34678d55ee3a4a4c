use async_trait::async_trait;

use super::{QuotaError, QuotaToken, QuotaTokenId};

/// Per-owner admission ledger.
///
/// Counts concurrently outstanding reservations, not requests per interval.
#[async_trait]
pub trait QuotaLedger: Send + Sync {
    /// Issue a token if the owner is below its ceiling.
    ///
    /// Fails with `QuotaError::Exceeded` without touching the ledger otherwise.
    async fn reserve(&self, owner_id: &str) -> Result<QuotaToken, QuotaError>;

    /// Remove a token. Returns `true` only for the call that actually removed
    /// it; unknown or already released tokens are a no-op.
    async fn release(&self, token: &QuotaTokenId) -> bool;

    /// Number of tokens the owner currently holds.
    async fn outstanding(&self, owner_id: &str) -> usize;
}
