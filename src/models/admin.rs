//! Admin account model

use serde::{Deserialize, Serialize};

/// An organizer account; the password is write-only and never read back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// Update body; the password is only sent when it changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAdminRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha", skip_serializing_if = "Option::is_none", default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_without_password_omits_field() {
        let request = UpdateAdminRequest {
            name: "Ana".to_string(),
            email: "ana@semed.gov.br".to_string(),
            password: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["nome"], "Ana");
        assert!(value.get("senha").is_none());
    }
}
