//! JornadaPortal
//!
//! Client library for the Jornada Pedagógica event portal.
//! This library provides the registration form and evaluation flow controllers,
//! the admin panels used by organizers, and the thin API client that talks to
//! the portal backend, together with CPF/phone masking and validation.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{PortalError, Result};

// Re-export main components for easy access
pub use services::{ApiClient, ServiceFactory, SessionManager, SettingsService};
pub use state::{EvaluationFlow, RegistrationForm};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
