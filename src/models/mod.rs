//! Data models module
//!
//! This module contains the data structures exchanged with the portal backend.
//! Rust field names are English; wire names follow the backend.

pub mod registration;
pub mod evaluation;
pub mod settings;
pub mod admin;
pub mod stats;

use serde::{Deserialize, Deserializer};

// Re-export commonly used models
pub use registration::{Participant, ParticipationDay, PresenceUpdate, RegistrationRequest, Vacancies, DayVacancy, ROLE_OPTIONS, ROLE_PLACEHOLDER};
pub use evaluation::{EvaluationRequest, RatingCategory};
pub use settings::{EventSettings, SettingsMap};
pub use admin::{AdminAccount, CreateAdminRequest, UpdateAdminRequest, LoginRequest, LoginResponse};
pub use stats::{RegistrationStats, EvaluationStats, CertificateStats, ActionMessage};

/// Accept `true`/`false` as well as the `0`/`1` integers some endpoints return
pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}
