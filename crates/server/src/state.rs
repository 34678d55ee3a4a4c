use std::sync::Arc;
use valuator_core::{AdmissionService, Authenticator, Config, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    authenticator: Arc<dyn Authenticator>,
    admission: AdmissionService,
    /// Rendered OpenAPI document, if one is configured.
    openapi_document: Option<String>,
}

impl AppState {
    pub fn new(
        config: Config,
        authenticator: Arc<dyn Authenticator>,
        admission: AdmissionService,
    ) -> Self {
        Self {
            config,
            authenticator,
            admission,
            openapi_document: None,
        }
    }

    pub fn with_openapi_document(mut self, document: String) -> Self {
        self.openapi_document = Some(document);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn admission(&self) -> &AdmissionService {
        &self.admission
    }

    pub fn openapi_document(&self) -> Option<&str> {
        self.openapi_document.as_deref()
    }
}
