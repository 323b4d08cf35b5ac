use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::CompletionBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key was found at startup; the service is then locked.
    pub backend: Option<Arc<dyn CompletionBackend>>,
    pub config: Config,
}

impl AppState {
    /// The completion backend, or `CredentialMissing` while locked.
    pub fn backend(&self) -> Result<&dyn CompletionBackend, AppError> {
        self.backend.as_deref().ok_or(AppError::CredentialMissing)
    }

    pub fn is_locked(&self) -> bool {
        self.backend.is_none()
    }
}
