//! Mock portal backend for testing
//!
//! This module provides a mock HTTP server that simulates the portal REST API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Token handed out by the mocked login endpoint
pub const TEST_TOKEN: &str = "test-admin-token";

/// Mock portal backend
pub struct PortalMockServer {
    pub server: MockServer,
    pub base_url: String,
}

impl PortalMockServer {
    /// Start a new mock server; the API lives under `/api`
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let base_url = format!("{}/api", server.uri());

        Self { server, base_url }
    }

    fn api_path(endpoint: &str) -> String {
        format!("/api/{}", endpoint.trim_start_matches('/'))
    }

    /// Answer a public endpoint with a JSON body
    pub async fn mock_public(&self, verb: &str, endpoint: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(Self::api_path(endpoint)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer a protected endpoint, only when the test token is presented
    pub async fn mock_protected(&self, verb: &str, endpoint: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(Self::api_path(endpoint)))
            .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Same as `mock_protected`, failing the test unless hit exactly `times`
    pub async fn expect_protected(&self, verb: &str, endpoint: &str, body: Value, times: u64) {
        Mock::given(method(verb))
            .and(path(Self::api_path(endpoint)))
            .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Protected endpoint answering with a plain text body
    pub async fn mock_protected_text(&self, verb: &str, endpoint: &str, body: &str) {
        Mock::given(method(verb))
            .and(path(Self::api_path(endpoint)))
            .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/csv; charset=utf-8")
                    .set_body_string(body),
            )
            .mount(&self.server)
            .await;
    }

    /// Endpoint that rejects every request with 401
    pub async fn mock_unauthorized(&self, verb: &str, endpoint: &str) {
        self.mock_public(verb, endpoint, 401, json!({ "error": "Token inválido" })).await;
    }

    /// Endpoint that must never be called
    pub async fn expect_no_call(&self, verb: &str, endpoint: &str) {
        Mock::given(method(verb))
            .and(path(Self::api_path(endpoint)))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// `POST /auth/login` issuing `TEST_TOKEN`
    pub async fn mock_login(&self) {
        self.mock_public("POST", "auth/login", 200, json!({ "token": TEST_TOKEN })).await;
    }

    /// `GET /inscricoes/vagas` with the given remaining counts
    pub async fn mock_vacancies(&self, day1: i64, day2: i64) {
        let body = json!({
            "dia1": { "total": 500 - day1, "max": 500, "disponivel": day1 },
            "dia2": { "total": 500 - day2, "max": 500, "disponivel": day2 },
        });
        self.mock_public("GET", "inscricoes/vagas", 200, body).await;
    }

    /// `GET /settings`
    pub async fn mock_settings(&self, body: Value) {
        self.mock_public("GET", "settings", 200, body).await;
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
