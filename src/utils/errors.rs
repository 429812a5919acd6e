//! Error handling for JornadaPortal
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Message the backend puts in the error body when a CPF is already registered
pub const DUPLICATE_CPF_MARKER: &str = "CPF já inscrito";

/// Message shown when the backend rejects the admin session
pub const SESSION_EXPIRED_MESSAGE: &str = "Sessão expirada";

/// Main error type for JornadaPortal
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    DuplicateCpf(String),

    #[error("Sessão expirada")]
    SessionExpired,

    #[error("Not authenticated: login required")]
    NotAuthenticated,

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for JornadaPortal operations
pub type Result<T> = std::result::Result<T, PortalError>;

impl PortalError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            PortalError::Config(_) => false,
            PortalError::Validation(_) => true,
            PortalError::DuplicateCpf(_) => true,
            PortalError::SessionExpired => true,
            PortalError::NotAuthenticated => true,
            PortalError::Api { .. } => true,
            PortalError::InvalidStateTransition { .. } => false,
            PortalError::Http(_) => true,
            PortalError::Serialization(_) => true,
            PortalError::Io(_) => true,
            PortalError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PortalError::Config(_) => ErrorSeverity::Critical,
            PortalError::UrlParse(_) => ErrorSeverity::Critical,
            PortalError::SessionExpired => ErrorSeverity::Warning,
            PortalError::NotAuthenticated => ErrorSeverity::Warning,
            PortalError::DuplicateCpf(_) => ErrorSeverity::Info,
            PortalError::Validation(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Whether the error means the admin has to log in again
    pub fn requires_login(&self) -> bool {
        matches!(self, PortalError::SessionExpired | PortalError::NotAuthenticated)
    }

    /// Message to surface to the person using the portal.
    ///
    /// Messages that come from the backend or from local validation are shown
    /// verbatim; transport and parsing failures collapse into `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            PortalError::Validation(message)
            | PortalError::DuplicateCpf(message)
            | PortalError::Api { message, .. } => message.clone(),
            PortalError::SessionExpired | PortalError::NotAuthenticated => {
                SESSION_EXPIRED_MESSAGE.to_string()
            }
            _ => fallback.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_keeps_remote_text() {
        let err = PortalError::Api { status: 400, message: "Inscrições encerradas".to_string() };
        assert_eq!(err.user_message("Erro"), "Inscrições encerradas");
        assert_eq!(err.to_string(), "Inscrições encerradas");
    }

    #[test]
    fn test_user_message_falls_back_for_parse_failures() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = PortalError::Serialization(parse_err);
        assert_eq!(err.user_message("Erro ao realizar inscrição"), "Erro ao realizar inscrição");
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(PortalError::SessionExpired.is_recoverable());
        assert!(PortalError::Api { status: 503, message: "indisponível".to_string() }.is_recoverable());
        assert!(!PortalError::Config("missing api.base_url".to_string()).is_recoverable());
    }

    #[test]
    fn test_session_errors_require_login() {
        assert!(PortalError::SessionExpired.requires_login());
        assert!(PortalError::NotAuthenticated.requires_login());
        assert!(!PortalError::Validation("x".to_string()).requires_login());
        assert_eq!(PortalError::SessionExpired.to_string(), "Sessão expirada");
        assert_eq!(PortalError::SessionExpired.severity(), ErrorSeverity::Warning);
    }
}
