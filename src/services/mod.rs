//! Services module
//!
//! This module contains the session, backend API and event settings services

pub mod api;
pub mod auth;
pub mod settings;

// Re-export commonly used services
pub use api::ApiClient;
pub use auth::{FileSessionStore, MemorySessionStore, Session, SessionManager, SessionStore};
pub use settings::SettingsService;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::models::EventSettings;
use crate::utils::errors::Result;

/// Service factory for creating and wiring all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub settings: Settings,
    pub session: Arc<SessionManager>,
    pub api: ApiClient,
    pub event_settings: Arc<SettingsService>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with the session persisted to the configured file
    pub fn new(settings: Settings) -> Result<Self> {
        let store = Arc::new(FileSessionStore::new(&settings.session.store_path));
        Self::with_store(settings, store)
    }

    /// Create a new ServiceFactory on top of a given session store
    pub fn with_store(settings: Settings, store: Arc<dyn SessionStore>) -> Result<Self> {
        let session = Arc::new(SessionManager::new(store)?);
        let api = ApiClient::new(&settings.api, session.clone())?;
        let defaults = EventSettings::from(&settings.event);
        let event_settings = Arc::new(SettingsService::new(api.clone(), defaults));

        Ok(Self {
            settings,
            session,
            api,
            event_settings,
        })
    }

    /// Load event settings from the backend, keeping defaults on failure
    pub async fn bootstrap(&self) -> Arc<EventSettings> {
        self.event_settings.refresh().await
    }

    /// Health summary for diagnostics
    pub fn health_check(&self) -> ServiceHealthStatus {
        ServiceHealthStatus {
            api_base_url: self.settings.api.base_url.clone(),
            authenticated: self.session.is_authenticated(),
            event_name: self.event_settings.snapshot().name.clone(),
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub api_base_url: String,
    pub authenticated: bool,
    pub event_name: String,
}

impl ServiceHealthStatus {
    /// Get list of issues worth reporting
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.authenticated {
            issues.push("No admin session; protected commands require login".to_string());
        }
        if self.event_name.trim().is_empty() {
            issues.push("Event name is empty".to_string());
        }

        issues
    }
}
