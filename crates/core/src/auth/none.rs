use async_trait::async_trait;

use super::{AuthError, AuthRequest, Authenticator, Identity};

/// Credential-free identity provider.
///
/// Every request is attributed to one shared owner, so all callers draw on a
/// single quota and see the same job list. The owner is `anonymous` unless
/// `auth.default_owner` names another one.
#[derive(Debug, Clone)]
pub struct NoneAuthenticator {
    owner_id: String,
}

impl NoneAuthenticator {
    pub fn new() -> Self {
        Self::for_owner(Identity::anonymous().user_id)
    }

    /// Attribute every request to `owner_id`.
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

impl Default for NoneAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for NoneAuthenticator {
    async fn authenticate(&self, _request: &AuthRequest) -> Result<Identity, AuthError> {
        Ok(Identity::new(self.owner_id.clone(), "none"))
    }

    fn method_name(&self) -> &'static str {
        "none"
    }
}
