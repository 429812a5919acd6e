//! Certificates panel
//!
//! Generation and delivery run on the backend; the panel only triggers them,
//! shows the server's message and re-reads the counters afterwards.

use crate::models::CertificateStats;
use crate::services::ApiClient;
use crate::services::api::{GENERATE_FALLBACK, LOAD_FALLBACK, SEND_FALLBACK};
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;
use super::{Feedback, PanelState};

#[derive(Debug)]
pub struct CertificatesPanel {
    stats: CertificateStats,
    state: PanelState,
    generated: bool,
    sent: bool,
    feedback: Option<Feedback>,
}

impl CertificatesPanel {
    pub fn new() -> Self {
        Self {
            stats: CertificateStats::default(),
            state: PanelState::Loading,
            generated: false,
            sent: false,
            feedback: None,
        }
    }

    pub fn stats(&self) -> &CertificateStats {
        &self.stats
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Certificates exist for at least one attendee
    pub fn generated(&self) -> bool {
        self.generated
    }

    /// Every generated certificate has been delivered
    pub fn sent(&self) -> bool {
        self.sent
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Sending only makes sense once certificates were generated
    pub fn can_send(&self) -> bool {
        self.generated && !self.sent
    }

    /// Take new counters. The flags only ever switch on.
    pub fn apply_stats(&mut self, stats: CertificateStats) {
        if stats.generated > 0 {
            self.generated = true;
        }
        if stats.sent > 0 && stats.pending == 0 {
            self.sent = true;
        }
        self.state = if stats.total_present == 0 { PanelState::Empty } else { PanelState::Loaded };
        self.stats = stats;
    }

    pub async fn load(&mut self, api: &ApiClient) {
        match api.fetch_certificate_stats().await {
            Ok(stats) => self.apply_stats(stats),
            Err(e) => self.state = PanelState::failed(&e, LOAD_FALLBACK),
        }
    }

    /// Ask the backend to generate certificates for everyone present
    pub async fn generate(&mut self, api: &ApiClient) -> Result<String> {
        self.feedback = None;
        match api.generate_certificates().await {
            Ok(result) => {
                log_admin_action("generate_certificates", None, Some(&result.message));
                self.generated = true;
                self.feedback = Some(Feedback::Success(result.message.clone()));
                self.load(api).await;
                Ok(result.message)
            }
            Err(e) => {
                self.feedback = Some(Feedback::Error(e.user_message(GENERATE_FALLBACK)));
                Err(e)
            }
        }
    }

    /// Ask the backend to e-mail the generated certificates
    pub async fn send(&mut self, api: &ApiClient) -> Result<String> {
        self.feedback = None;
        match api.send_certificates().await {
            Ok(result) => {
                log_admin_action("send_certificates", None, Some(&result.message));
                self.sent = true;
                self.feedback = Some(Feedback::Success(result.message.clone()));
                self.load(api).await;
                Ok(result.message)
            }
            Err(e) => {
                self.feedback = Some(Feedback::Error(e.user_message(SEND_FALLBACK)));
                Err(e)
            }
        }
    }
}

impl Default for CertificatesPanel {
    fn default() -> Self {
        Self::new()
    }
}
