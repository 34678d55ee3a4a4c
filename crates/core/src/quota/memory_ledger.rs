//! In-process quota ledger with TTL expiry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{QuotaError, QuotaLedger, QuotaToken, QuotaTokenId};
use crate::config::QuotaConfig;
use crate::metrics::{QUOTA_RESERVATIONS_TOTAL, QUOTA_TOKENS_EXPIRED, QUOTA_TOKENS_OUTSTANDING};

#[derive(Debug, Default)]
struct TokenTable {
    by_owner: HashMap<String, Vec<QuotaTokenId>>,
    owners: HashMap<QuotaTokenId, String>,
}

impl TokenTable {
    fn count(&self, owner_id: &str) -> usize {
        self.by_owner.get(owner_id).map_or(0, Vec::len)
    }

    fn insert(&mut self, token: &QuotaToken) {
        self.by_owner
            .entry(token.owner_id.clone())
            .or_default()
            .push(token.id);
        self.owners.insert(token.id, token.owner_id.clone());
    }

    fn remove(&mut self, id: &QuotaTokenId) -> bool {
        let Some(owner_id) = self.owners.remove(id) else {
            return false;
        };

        if let Some(tokens) = self.by_owner.get_mut(&owner_id) {
            tokens.retain(|t| t != id);
            if tokens.is_empty() {
                self.by_owner.remove(&owner_id);
            }
        }
        true
    }
}

async fn remove_token(tokens: &RwLock<TokenTable>, id: &QuotaTokenId) -> bool {
    let removed = tokens.write().await.remove(id);
    if removed {
        QUOTA_TOKENS_OUTSTANDING.dec();
    }
    removed
}

/// Quota ledger kept in memory.
///
/// All reads and writes of the token table go through one lock, so a
/// reservation's count check and insert are atomic and an explicit release
/// racing the expiry task removes the token exactly once.
pub struct InMemoryQuotaLedger {
    tokens: Arc<RwLock<TokenTable>>,
    ceiling: usize,
    owner_ceilings: HashMap<String, usize>,
    ttl: Duration,
}

impl InMemoryQuotaLedger {
    pub fn new(ceiling: usize, ttl: Duration) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(TokenTable::default())),
            ceiling,
            owner_ceilings: HashMap::new(),
            ttl,
        }
    }

    pub fn from_config(config: &QuotaConfig) -> Self {
        Self {
            owner_ceilings: config.owner_ceilings.clone(),
            ..Self::new(config.ceiling, Duration::from_secs(config.token_ttl_secs))
        }
    }

    /// Override the ceiling for a single owner.
    pub fn with_owner_ceiling(mut self, owner_id: impl Into<String>, ceiling: usize) -> Self {
        self.owner_ceilings.insert(owner_id.into(), ceiling);
        self
    }

    /// Ceiling that applies to this owner.
    pub fn ceiling_for(&self, owner_id: &str) -> usize {
        self.owner_ceilings
            .get(owner_id)
            .copied()
            .unwrap_or(self.ceiling)
    }

    fn schedule_expiry(&self, id: QuotaTokenId) {
        let tokens = Arc::clone(&self.tokens);
        let ttl = self.ttl;

        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if remove_token(&tokens, &id).await {
                QUOTA_TOKENS_EXPIRED.inc();
                debug!(token_id = %id, "Quota token expired");
            }
        });
    }
}

impl Default for InMemoryQuotaLedger {
    fn default() -> Self {
        Self::from_config(&QuotaConfig::default())
    }
}

#[async_trait]
impl QuotaLedger for InMemoryQuotaLedger {
    async fn reserve(&self, owner_id: &str) -> Result<QuotaToken, QuotaError> {
        let ceiling = self.ceiling_for(owner_id);

        let token = {
            let mut tokens = self.tokens.write().await;
            if tokens.count(owner_id) >= ceiling {
                QUOTA_RESERVATIONS_TOTAL
                    .with_label_values(&["exceeded"])
                    .inc();
                info!(owner_id, ceiling, "Quota exceeded");
                return Err(QuotaError::Exceeded {
                    owner_id: owner_id.to_string(),
                    ceiling,
                });
            }

            let token = QuotaToken::new(owner_id);
            tokens.insert(&token);
            token
        };

        QUOTA_TOKENS_OUTSTANDING.inc();
        QUOTA_RESERVATIONS_TOTAL
            .with_label_values(&["granted"])
            .inc();
        debug!(token_id = %token.id, owner_id, "Quota token issued");

        self.schedule_expiry(token.id);
        Ok(token)
    }

    async fn release(&self, token: &QuotaTokenId) -> bool {
        remove_token(&self.tokens, token).await
    }

    async fn outstanding(&self, owner_id: &str) -> usize {
        self.tokens.read().await.count(owner_id)
    }
}
