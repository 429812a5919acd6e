//! Portal backend API client
//!
//! Thin HTTP client over the portal REST API. Each call issues exactly one
//! request and never retries. Protected endpoints take the bearer token from
//! the injected `SessionManager`; a 401 on any of them invalidates the session
//! here, so callers only ever see `PortalError::SessionExpired`.

use std::sync::Arc;
use std::time::{Duration, Instant};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use crate::config::ApiConfig;
use crate::models::{
    ActionMessage, AdminAccount, CertificateStats, CreateAdminRequest, EvaluationRequest,
    EvaluationStats, LoginRequest, LoginResponse, Participant, PresenceUpdate,
    RegistrationRequest, RegistrationStats, SettingsMap, UpdateAdminRequest, Vacancies,
};
use crate::utils::errors::{PortalError, Result, DUPLICATE_CPF_MARKER};
use crate::utils::logging::{log_api_error, log_api_request};
use super::auth::{Session, SessionManager};

pub const REGISTRATION_FALLBACK: &str = "Erro ao realizar inscrição";
pub const EVALUATION_FALLBACK: &str = "Erro ao enviar avaliação";
pub const LOGIN_FALLBACK: &str = "Erro ao fazer login";
pub const GENERATE_FALLBACK: &str = "Erro ao gerar certificados";
pub const SEND_FALLBACK: &str = "Erro ao enviar certificados";
pub const SETTINGS_FALLBACK: &str = "Erro ao atualizar configurações";
pub const LOAD_FALLBACK: &str = "Erro ao carregar";
pub const SAVE_FALLBACK: &str = "Erro ao salvar";
pub const DELETE_FALLBACK: &str = "Erro ao excluir";
pub const EXPORT_FALLBACK: &str = "Erro ao exportar";

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
}

/// Whether a call needs the admin bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    Protected,
}

/// Client for the portal backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Arc<SessionManager>,
}

impl ApiClient {
    /// Create a new ApiClient instance
    pub fn new(config: &ApiConfig, session: Arc<SessionManager>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(PortalError::Http)?;

        let mut base_url = Url::parse(&config.base_url)?;
        // Keep the last path segment when joining relative endpoints
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Absolute URL of an endpoint path such as `inscricoes/stats`
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Public ──

    /// `POST /inscricoes`
    pub async fn submit_registration(&self, request: &RegistrationRequest) -> Result<Value> {
        let body = serde_json::to_value(request)?;
        let result = self
            .call(Method::POST, "inscricoes", Access::Public, Some(body), REGISTRATION_FALLBACK)
            .await;

        match result {
            Ok(response) => read_json(response).await,
            Err(PortalError::Api { message, .. }) if message.contains(DUPLICATE_CPF_MARKER) => {
                Err(PortalError::DuplicateCpf(message))
            }
            Err(e) => Err(e),
        }
    }

    /// `GET /inscricoes/vagas`
    pub async fn fetch_vacancies(&self) -> Result<Vacancies> {
        let response = self
            .call(Method::GET, "inscricoes/vagas", Access::Public, None, LOAD_FALLBACK)
            .await?;
        read_json(response).await
    }

    /// `POST /avaliacoes`
    pub async fn submit_evaluation(&self, request: &EvaluationRequest) -> Result<Value> {
        let body = serde_json::to_value(request)?;
        let response = self
            .call(Method::POST, "avaliacoes", Access::Public, Some(body), EVALUATION_FALLBACK)
            .await?;
        read_json(response).await
    }

    /// `GET /settings`
    pub async fn fetch_settings(&self) -> Result<SettingsMap> {
        let response = self
            .call(Method::GET, "settings", Access::Public, None, LOAD_FALLBACK)
            .await?;
        read_json(response).await
    }

    // ── Auth ──

    /// `POST /auth/login`; a successful answer starts the session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let body = serde_json::to_value(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response = self
            .call(Method::POST, "auth/login", Access::Public, Some(body), LOGIN_FALLBACK)
            .await?;
        let login: LoginResponse = read_json(response).await?;

        self.session.start(login.token)
    }

    pub fn logout(&self) -> Result<()> {
        self.session.invalidate()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // ── Admin: registrations ──

    /// `GET /inscricoes`
    pub async fn fetch_participants(&self) -> Result<Vec<Participant>> {
        let response = self
            .call(Method::GET, "inscricoes", Access::Protected, None, LOAD_FALLBACK)
            .await?;
        read_json(response).await
    }

    /// `GET /inscricoes/stats`
    pub async fn fetch_registration_stats(&self) -> Result<RegistrationStats> {
        let response = self
            .call(Method::GET, "inscricoes/stats", Access::Protected, None, LOAD_FALLBACK)
            .await?;
        read_json(response).await
    }

    /// `PATCH /inscricoes/:id/presenca`
    pub async fn toggle_presence(&self, id: i64) -> Result<PresenceUpdate> {
        let path = format!("inscricoes/{}/presenca", id);
        let response = self
            .call(Method::PATCH, &path, Access::Protected, None, SAVE_FALLBACK)
            .await?;
        read_json(response).await
    }

    /// `DELETE /inscricoes/:id`
    pub async fn delete_registration(&self, id: i64) -> Result<()> {
        let path = format!("inscricoes/{}", id);
        self.call(Method::DELETE, &path, Access::Protected, None, DELETE_FALLBACK)
            .await?;
        Ok(())
    }

    /// `GET /inscricoes/export` as CSV text
    pub async fn export_registrations_csv(&self) -> Result<String> {
        let response = self
            .call(Method::GET, "inscricoes/export", Access::Protected, None, EXPORT_FALLBACK)
            .await?;
        Ok(response.text().await?)
    }

    // ── Admin: evaluations ──

    /// `GET /avaliacoes/stats`
    pub async fn fetch_evaluation_stats(&self) -> Result<EvaluationStats> {
        let response = self
            .call(Method::GET, "avaliacoes/stats", Access::Protected, None, LOAD_FALLBACK)
            .await?;
        read_json(response).await
    }

    /// `GET /avaliacoes/export` as CSV text
    pub async fn export_evaluations_csv(&self) -> Result<String> {
        let response = self
            .call(Method::GET, "avaliacoes/export", Access::Protected, None, EXPORT_FALLBACK)
            .await?;
        Ok(response.text().await?)
    }

    // ── Admin: settings ──

    /// `PUT /settings`
    pub async fn update_settings(&self, settings: &SettingsMap) -> Result<Value> {
        let body = serde_json::to_value(settings)?;
        let response = self
            .call(Method::PUT, "settings", Access::Protected, Some(body), SETTINGS_FALLBACK)
            .await?;
        read_json_or_null(response).await
    }

    // ── Admin: certificates ──

    /// `POST /certificados/gerar`
    pub async fn generate_certificates(&self) -> Result<ActionMessage> {
        let response = self
            .call(Method::POST, "certificados/gerar", Access::Protected, None, GENERATE_FALLBACK)
            .await?;
        read_json(response).await
    }

    /// `POST /certificados/enviar`
    pub async fn send_certificates(&self) -> Result<ActionMessage> {
        let response = self
            .call(Method::POST, "certificados/enviar", Access::Protected, None, SEND_FALLBACK)
            .await?;
        read_json(response).await
    }

    /// `GET /certificados/stats`
    pub async fn fetch_certificate_stats(&self) -> Result<CertificateStats> {
        let response = self
            .call(Method::GET, "certificados/stats", Access::Protected, None, LOAD_FALLBACK)
            .await?;
        read_json(response).await
    }

    // ── Admin: accounts ──

    /// `GET /admins`
    pub async fn list_admins(&self) -> Result<Vec<AdminAccount>> {
        let response = self
            .call(Method::GET, "admins", Access::Protected, None, LOAD_FALLBACK)
            .await?;
        read_json(response).await
    }

    /// `POST /admins`; returns the raw body, which may or may not echo the account
    pub async fn create_admin(&self, request: &CreateAdminRequest) -> Result<Value> {
        let body = serde_json::to_value(request)?;
        let response = self
            .call(Method::POST, "admins", Access::Protected, Some(body), SAVE_FALLBACK)
            .await?;
        read_json_or_null(response).await
    }

    /// `PUT /admins/:id`
    pub async fn update_admin(&self, id: i64, request: &UpdateAdminRequest) -> Result<Value> {
        let body = serde_json::to_value(request)?;
        let path = format!("admins/{}", id);
        let response = self
            .call(Method::PUT, &path, Access::Protected, Some(body), SAVE_FALLBACK)
            .await?;
        read_json_or_null(response).await
    }

    /// `DELETE /admins/:id`
    pub async fn delete_admin(&self, id: i64) -> Result<()> {
        let path = format!("admins/{}", id);
        self.call(Method::DELETE, &path, Access::Protected, None, DELETE_FALLBACK)
            .await?;
        Ok(())
    }

    /// Issue one request and turn non-2xx answers into errors
    async fn call(
        &self,
        method: Method,
        path: &str,
        access: Access,
        body: Option<Value>,
        fallback: &str,
    ) -> Result<Response> {
        let url = self.endpoint_url(path)?;
        let mut request = self.client.request(method.clone(), url);

        if access == Access::Protected {
            let token = self.session.token().ok_or(PortalError::NotAuthenticated)?;
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        debug!(method = %method, endpoint = path, "Sending API request");
        let started = Instant::now();

        let response = request.send().await.map_err(|e| {
            log_api_error(path, None, &e.to_string());
            PortalError::Http(e)
        })?;

        let status = response.status();
        log_api_request(method.as_str(), path, status.as_u16(), started.elapsed().as_millis() as u64);

        if access == Access::Protected && status == StatusCode::UNAUTHORIZED {
            warn!(endpoint = path, "Backend rejected admin session, logging out");
            self.session.invalidate()?;
            return Err(PortalError::SessionExpired);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = error_message(&text).unwrap_or_else(|| fallback.to_string());
            log_api_error(path, Some(status.as_u16()), &message);
            return Err(PortalError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

/// Pull `error` out of a backend error body
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Like `read_json`, but an empty body reads as `null`
async fn read_json_or_null(response: Response) -> Result<Value> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_seconds: None,
            user_agent: "test".to_string(),
        };
        ApiClient::new(&config, Arc::new(SessionManager::in_memory())).unwrap()
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let api = client("http://localhost:3001/api");
        assert_eq!(
            api.endpoint_url("inscricoes/stats").unwrap().as_str(),
            "http://localhost:3001/api/inscricoes/stats"
        );

        let api = client("http://localhost:3001/api/");
        assert_eq!(
            api.endpoint_url("/settings").unwrap().as_str(),
            "http://localhost:3001/api/settings"
        );
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"error":"CPF já inscrito"}"#).as_deref(), Some("CPF já inscrito"));
        assert_eq!(error_message(r#"{"error":""}"#), None);
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(r#"{"message":"x"}"#), None);
    }

    #[tokio::test]
    async fn test_protected_call_without_session_is_rejected_locally() {
        let api = client("http://127.0.0.1:9/api");
        let err = api.fetch_participants().await.unwrap_err();
        assert!(matches!(err, PortalError::NotAuthenticated));
    }
}
