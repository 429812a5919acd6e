//! Admin accounts panel

use serde_json::Value;
use crate::models::{AdminAccount, CreateAdminRequest, UpdateAdminRequest};
use crate::services::ApiClient;
use crate::services::api::{DELETE_FALLBACK, LOAD_FALLBACK, SAVE_FALLBACK};
use crate::utils::errors::{PortalError, Result};
use crate::utils::logging::log_admin_action;
use super::{Feedback, PanelState};

pub const CREATED_MESSAGE: &str = "Administrador criado com sucesso!";
pub const UPDATED_MESSAGE: &str = "Administrador atualizado com sucesso!";
pub const DELETED_MESSAGE: &str = "Administrador excluído com sucesso!";
pub const REQUIRED_FIELDS_MESSAGE: &str = "Preencha nome, e-mail e senha.";

/// Mutation results applied to the local account list
#[derive(Debug, Clone)]
pub enum AdminAction {
    Loaded(Vec<AdminAccount>),
    Upserted(AdminAccount),
    Removed(i64),
}

pub fn reduce(admins: &mut Vec<AdminAccount>, action: AdminAction) {
    match action {
        AdminAction::Loaded(list) => *admins = list,
        AdminAction::Upserted(account) => {
            match admins.iter().position(|a| a.id == account.id) {
                Some(index) => admins[index] = account,
                None => admins.push(account),
            }
        }
        AdminAction::Removed(id) => admins.retain(|a| a.id != id),
    }
}

/// Create/edit form. `editing` holds the id of the account being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminForm {
    pub editing: Option<i64>,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AdminForm {
    pub fn create(name: &str, email: &str, password: &str) -> Self {
        Self {
            editing: None,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    /// Edit form prefilled from an account; the password starts blank
    pub fn edit(account: &AdminAccount) -> Self {
        Self {
            editing: Some(account.id),
            name: account.name.clone(),
            email: account.email.clone(),
            password: String::new(),
        }
    }

    /// Name and e-mail are always required, the password only on create
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && (self.editing.is_some() || !self.password.trim().is_empty())
    }

    pub fn create_request(&self) -> CreateAdminRequest {
        CreateAdminRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    /// Update body; a blank password keeps the current one
    pub fn update_request(&self) -> UpdateAdminRequest {
        UpdateAdminRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: if self.password.trim().is_empty() { None } else { Some(self.password.clone()) },
        }
    }
}

#[derive(Debug)]
pub struct UsersPanel {
    admins: Vec<AdminAccount>,
    state: PanelState,
    feedback: Option<Feedback>,
}

impl UsersPanel {
    pub fn new() -> Self {
        Self {
            admins: Vec::new(),
            state: PanelState::Loading,
            feedback: None,
        }
    }

    pub fn admins(&self) -> &[AdminAccount] {
        &self.admins
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn apply(&mut self, action: AdminAction) {
        reduce(&mut self.admins, action);
        self.state = PanelState::from_len(self.admins.len());
    }

    pub async fn load(&mut self, api: &ApiClient) {
        match api.list_admins().await {
            Ok(list) => self.apply(AdminAction::Loaded(list)),
            Err(e) => {
                let message = e.user_message(LOAD_FALLBACK);
                self.feedback = Some(Feedback::Error(message.clone()));
                self.state = PanelState::Failed(message);
            }
        }
    }

    /// Create or update an account depending on `form.editing`
    pub async fn save(&mut self, api: &ApiClient, form: &AdminForm) -> Result<()> {
        if !form.is_complete() {
            return Err(PortalError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }
        self.feedback = None;

        let (result, success) = match form.editing {
            Some(id) => (api.update_admin(id, &form.update_request()).await, UPDATED_MESSAGE),
            None => (api.create_admin(&form.create_request()).await, CREATED_MESSAGE),
        };

        match result {
            Ok(body) => {
                let action = if form.editing.is_some() { "update_admin" } else { "create_admin" };
                log_admin_action(action, Some(&form.email), None);
                self.feedback = Some(Feedback::Success(success.to_string()));
                self.reconcile(api, body).await;
                Ok(())
            }
            Err(e) => {
                self.feedback = Some(Feedback::Error(e.user_message(SAVE_FALLBACK)));
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<()> {
        self.feedback = None;
        match api.delete_admin(id).await {
            Ok(()) => {
                log_admin_action("delete_admin", Some(&id.to_string()), None);
                self.feedback = Some(Feedback::Success(DELETED_MESSAGE.to_string()));
                self.apply(AdminAction::Removed(id));
                Ok(())
            }
            Err(e) => {
                self.feedback = Some(Feedback::Error(e.user_message(DELETE_FALLBACK)));
                Err(e)
            }
        }
    }

    /// Upsert the returned account, or reload when the response carries none
    async fn reconcile(&mut self, api: &ApiClient, body: Value) {
        match serde_json::from_value::<AdminAccount>(body) {
            Ok(account) => self.apply(AdminAction::Upserted(account)),
            Err(_) => match api.list_admins().await {
                Ok(list) => self.apply(AdminAction::Loaded(list)),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to reload admin accounts after save");
                    self.feedback = Some(Feedback::Error(e.user_message(LOAD_FALLBACK)));
                }
            },
        }
    }
}

impl Default for UsersPanel {
    fn default() -> Self {
        Self::new()
    }
}
