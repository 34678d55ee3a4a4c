//! API key authentication.

use async_trait::async_trait;

use super::{AuthError, AuthRequest, Authenticator, Identity};

/// Authenticator that maps API keys to owner identities.
///
/// Accepts the key in either:
/// - `X-API-Key: <key>` header
/// - `Authorization: Bearer <key>` header
///
/// Keys listed in the table resolve to their owner. Any other non-empty key
/// resolves to `default_owner` when one is configured and is rejected
/// otherwise.
pub struct ApiKeyAuthenticator {
    keys: Vec<(String, String)>,
    default_owner: Option<String>,
}

impl ApiKeyAuthenticator {
    pub fn new(keys: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            default_owner: None,
        }
    }

    /// Resolve unlisted keys to this owner instead of rejecting them.
    pub fn with_default_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.default_owner = Some(owner_id.into());
        self
    }

    fn extract_key<'a>(&self, request: &'a AuthRequest) -> Option<&'a str> {
        if let Some(key) = request.headers.get("x-api-key") {
            return Some(key.as_str());
        }

        let auth_header = request.headers.get("authorization")?;
        auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
    }

    fn lookup(&self, provided: &str) -> Option<&str> {
        // Scan every entry so the time taken does not reveal which key matched.
        let mut owner = None;
        for (key, owner_id) in &self.keys {
            if constant_time_eq(provided.as_bytes(), key.as_bytes()) {
                owner = Some(owner_id.as_str());
            }
        }
        owner
    }
}

#[async_trait]
impl Authenticator for ApiKeyAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError> {
        let provided_key = self
            .extract_key(request)
            .filter(|key| !key.is_empty())
            .ok_or(AuthError::NotAuthenticated)?;

        let owner = self
            .lookup(provided_key)
            .or(self.default_owner.as_deref())
            .ok_or_else(|| AuthError::InvalidCredentials("Invalid API key".to_string()))?;

        Ok(Identity::new(owner, self.method_name()))
    }

    fn method_name(&self) -> &'static str {
        "api_key"
    }
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
