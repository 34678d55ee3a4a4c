//! Mock quota ledger for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::quota::{QuotaError, QuotaLedger, QuotaToken, QuotaTokenId};

/// Mock implementation of the QuotaLedger trait.
///
/// Grants every reservation unless an error is queued with
/// `set_next_error`, and records issued and released tokens. Tokens never
/// expire.
#[derive(Debug, Default)]
pub struct MockQuotaLedger {
    issued: RwLock<Vec<QuotaToken>>,
    released: RwLock<Vec<QuotaTokenId>>,
    reserve_calls: RwLock<Vec<String>>,
    next_error: RwLock<Option<QuotaError>>,
}

impl MockQuotaLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `reserve` call with this error.
    pub async fn set_next_error(&self, error: QuotaError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn issued(&self) -> Vec<QuotaToken> {
        self.issued.read().await.clone()
    }

    /// Tokens removed by `release`, in call order.
    pub async fn released(&self) -> Vec<QuotaTokenId> {
        self.released.read().await.clone()
    }

    pub async fn reserve_calls(&self) -> Vec<String> {
        self.reserve_calls.read().await.clone()
    }
}

#[async_trait]
impl QuotaLedger for MockQuotaLedger {
    async fn reserve(&self, owner_id: &str) -> Result<QuotaToken, QuotaError> {
        self.reserve_calls.write().await.push(owner_id.to_string());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let token = QuotaToken::new(owner_id);
        self.issued.write().await.push(token.clone());
        Ok(token)
    }

    async fn release(&self, token: &QuotaTokenId) -> bool {
        let known = self.issued.read().await.iter().any(|t| t.id == *token);
        let mut released = self.released.write().await;
        if !known || released.contains(token) {
            return false;
        }
        released.push(*token);
        true
    }

    async fn outstanding(&self, owner_id: &str) -> usize {
        let released = self.released.read().await;
        self.issued
            .read()
            .await
            .iter()
            .filter(|t| t.owner_id == owner_id && !released.contains(&t.id))
            .count()
    }
}
