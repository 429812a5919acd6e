//! Admin panel controllers
//!
//! Each panel fetches its collection or stat object on load, exposes a
//! `PanelState` for rendering, and applies mutation responses to local state
//! through one reducer per entity. A rejected session is handled inside
//! `ApiClient`; panels only surface the resulting message.

pub mod certificates;
pub mod dashboard;
pub mod evaluations;
pub mod login;
pub mod participants;
pub mod settings;
pub mod users;

pub use certificates::CertificatesPanel;
pub use dashboard::DashboardPanel;
pub use evaluations::EvaluationsPanel;
pub use login::LoginForm;
pub use participants::{ParticipantAction, ParticipantFilter, ParticipantsPanel};
pub use settings::SettingsPanel;
pub use users::{AdminAction, AdminForm, UsersPanel};

use crate::utils::errors::PortalError;

/// Render state shared by all panels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Loading,
    Empty,
    Loaded,
    Failed(String),
}

impl PanelState {
    /// `Empty` or `Loaded` depending on whether there is anything to show
    pub fn from_len(len: usize) -> Self {
        if len == 0 { PanelState::Empty } else { PanelState::Loaded }
    }

    pub fn failed(error: &PortalError, fallback: &str) -> Self {
        PanelState::Failed(error.user_message(fallback))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PanelState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Outcome message of the last panel action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

impl Feedback {
    pub fn message(&self) -> &str {
        match self {
            Feedback::Success(message) | Feedback::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}
