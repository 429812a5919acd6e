//! Admin login form

use crate::services::{ApiClient, Session};
use crate::services::api::LOGIN_FALLBACK;
use crate::utils::errors::{PortalError, Result};
use crate::utils::logging::log_admin_action;

pub const CREDENTIALS_REQUIRED_MESSAGE: &str = "Informe e-mail e senha.";

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    error: Option<String>,
    submitting: bool,
}

impl LoginForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
            ..Self::default()
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Exchange the credentials for a session token
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Session> {
        if self.email.is_empty() || self.password.is_empty() {
            self.error = Some(CREDENTIALS_REQUIRED_MESSAGE.to_string());
            return Err(PortalError::Validation(CREDENTIALS_REQUIRED_MESSAGE.to_string()));
        }

        self.error = None;
        self.submitting = true;
        let result = api.login(&self.email, &self.password).await;
        self.submitting = false;

        match result {
            Ok(session) => {
                log_admin_action("login", Some(&self.email), None);
                self.password.clear();
                Ok(session)
            }
            Err(e) => {
                self.error = Some(e.user_message(LOGIN_FALLBACK));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::config::ApiConfig;
    use crate::services::SessionManager;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_blank_credentials_never_reach_backend() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            timeout_seconds: Some(1),
            user_agent: "test".to_string(),
        };
        let api = ApiClient::new(&config, Arc::new(SessionManager::in_memory())).unwrap();

        let mut form = LoginForm::new("  admin@jornada.com ", "");
        assert_eq!(form.email, "admin@jornada.com");
        assert_matches!(form.submit(&api).await, Err(PortalError::Validation(_)));
        assert_eq!(form.error(), Some(CREDENTIALS_REQUIRED_MESSAGE));
        assert!(!form.is_submitting());
    }
}
