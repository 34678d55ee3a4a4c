use super::{types::Config, AuthMethod, ConfigError};

/// Validate configuration
///
/// Rejects settings that would make the service unusable: port 0, a zero
/// quota ceiling or TTL, and API key auth that can never resolve an owner.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.quota.ceiling == 0 {
        return Err(ConfigError::ValidationError(
            "quota.ceiling must be at least 1".to_string(),
        ));
    }

    if config.quota.token_ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "quota.token_ttl_secs must be at least 1".to_string(),
        ));
    }

    if let Some((owner, _)) = config.quota.owner_ceilings.iter().find(|(_, c)| **c == 0) {
        return Err(ConfigError::ValidationError(format!(
            "quota.owner_ceilings.{} must be at least 1",
            owner
        )));
    }

    if config.auth.method == AuthMethod::ApiKey
        && config.auth.api_keys.is_empty()
        && config.auth.default_owner.is_none()
    {
        return Err(ConfigError::ValidationError(
            "auth.api_keys or auth.default_owner must be set when using api_key auth".to_string(),
        ));
    }

    Ok(())
}
