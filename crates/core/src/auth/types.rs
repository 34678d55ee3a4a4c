use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;

/// Request information for authentication
#[derive(Debug, Clone)]
pub struct AuthRequest {
    /// Header names are lowercased.
    pub headers: HashMap<String, String>,
    pub source_ip: IpAddr,
}

/// Authenticated identity.
///
/// `user_id` is the opaque owner key that jobs and quota are tracked under;
/// the core never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub method: String,
    #[serde(default)]
    pub claims: HashMap<String, serde_json::Value>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            method: method.into(),
            claims: HashMap::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new("anonymous", "none")
    }

    /// Owner id jobs and quota tokens are recorded under.
    pub fn owner_id(&self) -> &str {
        &self.user_id
    }
}
