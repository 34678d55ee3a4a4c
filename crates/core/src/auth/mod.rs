//! Identity providers that turn request credentials into an owner id.

mod api_key;
mod none;
mod traits;
mod types;

pub use api_key::*;
pub use none::*;
pub use traits::*;
pub use types::*;

use crate::config::{AuthConfig, AuthMethod};

/// Factory function to create authenticator from config
pub fn create_authenticator(config: &AuthConfig) -> Result<Box<dyn Authenticator>, AuthError> {
    match config.method {
        AuthMethod::None => Ok(Box::new(match &config.default_owner {
            Some(owner) => NoneAuthenticator::for_owner(owner.clone()),
            None => NoneAuthenticator::new(),
        })),
        AuthMethod::ApiKey => {
            if config.api_keys.is_empty() && config.default_owner.is_none() {
                return Err(AuthError::ConfigurationError(
                    "api_keys or default_owner must be set when using ApiKey auth method"
                        .to_string(),
                ));
            }

            let mut authenticator = ApiKeyAuthenticator::new(
                config
                    .api_keys
                    .iter()
                    .map(|(key, owner)| (key.clone(), owner.clone())),
            );
            if let Some(owner) = &config.default_owner {
                authenticator = authenticator.with_default_owner(owner.clone());
            }
            Ok(Box::new(authenticator))
        }
    }
}
