use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Opaque identifier of an issued quota token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotaTokenId(Uuid);

impl QuotaTokenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuotaTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuotaTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One unit of in-flight admission capacity held by an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaToken {
    pub id: QuotaTokenId,
    pub owner_id: String,
    pub issued_at: DateTime<Utc>,
}

impl QuotaToken {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            id: QuotaTokenId::new(),
            owner_id: owner_id.into(),
            issued_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum QuotaError {
    /// The owner already holds as many tokens as allowed. Expected outcome.
    #[error("Quota exceeded for {owner_id}: {ceiling} reservations outstanding")]
    Exceeded { owner_id: String, ceiling: usize },

    /// The ledger backend could not be reached.
    #[error("Quota ledger unavailable: {0}")]
    Unavailable(String),
}
