//! Event settings panel
//!
//! Edits the raw settings map. After a successful save the shared
//! `SettingsService` is refreshed so public components see the new values.

use std::collections::BTreeMap;
use std::sync::Arc;
use serde_json::Value;
use crate::models::settings::{
    value_text, KEY_CAPACITY_DAY1, KEY_CAPACITY_DAY2, KEY_DATE, KEY_LOCATION, KEY_NAME, KEY_WORKLOAD,
};
use crate::models::{EventSettings, SettingsMap};
use crate::services::{ApiClient, SettingsService};
use crate::services::api::{LOAD_FALLBACK, SAVE_FALLBACK};
use crate::utils::errors::{PortalError, Result};
use crate::utils::logging::log_admin_action;
use super::{Feedback, PanelState};

pub const SAVED_MESSAGE: &str = "Configurações atualizadas com sucesso!";
pub const NAME_REQUIRED_MESSAGE: &str = "O nome do evento é obrigatório.";

/// Capacity shown when the backend has no value yet
pub const DEFAULT_CAPACITY: &str = "500";

/// Editable keys with their labels, in display order
pub const FIELDS: [(&str, &str); 6] = [
    (KEY_NAME, "Nome do Evento"),
    (KEY_DATE, "Data do Evento"),
    (KEY_LOCATION, "Local do Evento"),
    (KEY_WORKLOAD, "Carga Horária (horas)"),
    (KEY_CAPACITY_DAY1, "Vagas — 1º Dia"),
    (KEY_CAPACITY_DAY2, "Vagas — 2º Dia"),
];

#[derive(Debug)]
pub struct SettingsPanel {
    form: BTreeMap<&'static str, String>,
    state: PanelState,
    feedback: Option<Feedback>,
}

impl SettingsPanel {
    pub fn new() -> Self {
        let form = FIELDS.iter().map(|(key, _)| (*key, String::new())).collect();
        Self {
            form,
            state: PanelState::Loading,
            feedback: None,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn value(&self, key: &str) -> &str {
        self.form.get(key).map(String::as_str).unwrap_or("")
    }

    /// Set one field; unknown keys are rejected
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let slot = self
            .form
            .get_mut(key)
            .ok_or_else(|| PortalError::Validation(format!("Campo desconhecido: {}", key)))?;
        *slot = value.to_string();
        Ok(())
    }

    /// Fill the form from a settings response
    pub fn fill(&mut self, map: &SettingsMap) {
        for (key, _) in FIELDS {
            let mut text = map.get(key).and_then(value_text).unwrap_or_default();
            if text.is_empty() && (key == KEY_CAPACITY_DAY1 || key == KEY_CAPACITY_DAY2) {
                text = DEFAULT_CAPACITY.to_string();
            }
            self.form.insert(key, text);
        }
        self.state = PanelState::Loaded;
    }

    pub async fn load(&mut self, api: &ApiClient) {
        match api.fetch_settings().await {
            Ok(map) => self.fill(&map),
            Err(e) => self.state = PanelState::failed(&e, LOAD_FALLBACK),
        }
    }

    /// Body for `PUT /settings`
    pub fn to_map(&self) -> SettingsMap {
        self.form
            .iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.clone())))
            .collect()
    }

    /// Save the form and refresh the shared settings snapshot
    pub async fn save(&mut self, api: &ApiClient, settings: &SettingsService) -> Result<Arc<EventSettings>> {
        if self.value(KEY_NAME).trim().is_empty() {
            return Err(PortalError::Validation(NAME_REQUIRED_MESSAGE.to_string()));
        }
        self.feedback = None;

        match api.update_settings(&self.to_map()).await {
            Ok(_) => {
                log_admin_action("update_settings", Some(self.value(KEY_NAME)), None);
                let snapshot = settings.refresh().await;
                self.feedback = Some(Feedback::Success(SAVED_MESSAGE.to_string()));
                Ok(snapshot)
            }
            Err(e) => {
                self.feedback = Some(Feedback::Error(e.user_message(SAVE_FALLBACK)));
                Err(e)
            }
        }
    }
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}
