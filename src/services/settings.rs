//! Event settings service
//!
//! Holds the current `EventSettings` snapshot. Components receive the snapshot
//! explicitly through `snapshot()`; nothing reads settings from ambient state.
//! The snapshot starts from configured defaults and is replaced by `refresh()`,
//! which runs on startup and again after an admin saves new settings.

use std::sync::{Arc, RwLock};
use tracing::{debug, error};
use crate::models::{EventSettings, SettingsMap};
use super::api::ApiClient;

#[derive(Debug)]
pub struct SettingsService {
    api: ApiClient,
    current: RwLock<Arc<EventSettings>>,
}

impl SettingsService {
    pub fn new(api: ApiClient, defaults: EventSettings) -> Self {
        Self {
            api,
            current: RwLock::new(Arc::new(defaults)),
        }
    }

    /// Current settings; cheap to clone and pass down
    pub fn snapshot(&self) -> Arc<EventSettings> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Merge a settings response into the snapshot and return the new value
    pub fn apply(&self, map: &SettingsMap) -> Arc<EventSettings> {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        let next = Arc::new(current.merged(map));
        *current = next.clone();
        next
    }

    /// Fetch `GET /settings` and merge it. A failed fetch keeps the last known value.
    pub async fn refresh(&self) -> Arc<EventSettings> {
        match self.api.fetch_settings().await {
            Ok(map) => {
                let next = self.apply(&map);
                debug!(event_name = %next.name, "Event settings refreshed");
                next
            }
            Err(e) => {
                error!(error = %e, "Failed to load event settings");
                self.snapshot()
            }
        }
    }
}
