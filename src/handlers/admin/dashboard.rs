//! Dashboard panel: registration totals and latest sign-ups

use crate::models::RegistrationStats;
use crate::services::ApiClient;
use crate::services::api::LOAD_FALLBACK;
use super::PanelState;

#[derive(Debug)]
pub struct DashboardPanel {
    stats: Option<RegistrationStats>,
    state: PanelState,
}

impl DashboardPanel {
    pub fn new() -> Self {
        Self { stats: None, state: PanelState::Loading }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn stats(&self) -> Option<&RegistrationStats> {
        self.stats.as_ref()
    }

    pub fn apply_stats(&mut self, stats: RegistrationStats) {
        self.state = if stats.total == 0 { PanelState::Empty } else { PanelState::Loaded };
        self.stats = Some(stats);
    }

    pub async fn load(&mut self, api: &ApiClient) {
        match api.fetch_registration_stats().await {
            Ok(stats) => self.apply_stats(stats),
            Err(e) => self.state = PanelState::failed(&e, LOAD_FALLBACK),
        }
    }

    /// Share of registrants checked in, as a percentage
    pub fn attendance_rate(&self) -> f64 {
        match &self.stats {
            Some(stats) if stats.total > 0 => stats.present as f64 * 100.0 / stats.total as f64,
            _ => 0.0,
        }
    }
}

impl Default for DashboardPanel {
    fn default() -> Self {
        Self::new()
    }
}
