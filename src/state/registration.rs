//! Registration form controller
//!
//! Holds field values, touched flags and per-field errors for the attendee
//! registration form, and drives it through
//! `Editing -> Submitting -> {Succeeded, Failed}`.
//!
//! Field validation runs on blur, and on every change once a field has been
//! touched, recomputing only that field's error. Submission validates the
//! whole form first and never reaches the network with an invalid field.

use std::collections::{BTreeMap, HashSet};
use serde_json::Value;
use tracing::debug;
use crate::models::{ParticipationDay, RegistrationRequest, Vacancies, ROLE_PLACEHOLDER};
use crate::services::ApiClient;
use crate::utils::errors::PortalError;
use crate::utils::logging::log_registration;
use crate::utils::validators::{format_cpf, format_phone, validate_cpf, validate_email, validate_phone};
use crate::services::api::REGISTRATION_FALLBACK;

pub const NAME_ERROR: &str = "Informe seu nome completo";
pub const CPF_ERROR: &str = "CPF inválido";
pub const EMAIL_ERROR: &str = "E-mail inválido";
pub const PHONE_ERROR: &str = "Telefone inválido";
pub const INSTITUTION_ERROR: &str = "Informe a instituição/escola";
pub const ROLE_ERROR: &str = "Selecione seu cargo";
pub const DAY_ERROR: &str = "Selecione o dia de participação";
pub const DUPLICATE_CPF_ERROR: &str = "Este CPF já está inscrito neste evento";

const NAME_MIN_CHARS: usize = 5;
const INSTITUTION_MIN_CHARS: usize = 3;

/// Fields of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Cpf,
    Email,
    Phone,
    Institution,
    Role,
    ParticipationDay,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::Cpf,
        FormField::Email,
        FormField::Phone,
        FormField::Institution,
        FormField::Role,
        FormField::ParticipationDay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Nome",
            FormField::Cpf => "CPF",
            FormField::Email => "E-mail",
            FormField::Phone => "Telefone",
            FormField::Institution => "Instituição",
            FormField::Role => "Cargo",
            FormField::ParticipationDay => "Dia de participação",
        }
    }
}

/// Current values of the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationData {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub institution: String,
    pub role: String,
    pub participation_day: Option<ParticipationDay>,
}

impl RegistrationData {
    fn to_request(&self, participation_day: ParticipationDay) -> RegistrationRequest {
        RegistrationRequest {
            name: self.name.clone(),
            cpf: self.cpf.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            institution: self.institution.clone(),
            role: self.role.clone(),
            participation_day,
        }
    }
}

pub type FieldErrors = BTreeMap<FormField, String>;

/// Validate every field, returning errors for the invalid ones only
pub fn validate(data: &RegistrationData) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if data.name.trim().chars().count() < NAME_MIN_CHARS {
        errors.insert(FormField::Name, NAME_ERROR.to_string());
    }
    if !validate_cpf(&data.cpf) {
        errors.insert(FormField::Cpf, CPF_ERROR.to_string());
    }
    if !validate_email(&data.email) {
        errors.insert(FormField::Email, EMAIL_ERROR.to_string());
    }
    if !validate_phone(&data.phone) {
        errors.insert(FormField::Phone, PHONE_ERROR.to_string());
    }
    if data.institution.trim().chars().count() < INSTITUTION_MIN_CHARS {
        errors.insert(FormField::Institution, INSTITUTION_ERROR.to_string());
    }
    if data.role.is_empty() || data.role == ROLE_PLACEHOLDER {
        errors.insert(FormField::Role, ROLE_ERROR.to_string());
    }
    if data.participation_day.is_none() {
        errors.insert(FormField::ParticipationDay, DAY_ERROR.to_string());
    }

    errors
}

/// What the confirmation message shows after a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting,
    Succeeded(Confirmation),
    /// The backend rejected the last submission; the form stays editable
    Failed,
}

/// How a day option should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAvailability {
    pub day: ParticipationDay,
    pub exhausted: bool,
    /// `None` until capacity counts are known
    pub remaining: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    data: RegistrationData,
    errors: FieldErrors,
    touched: HashSet<FormField>,
    status: FormStatus,
    form_error: Option<String>,
    vacancies: Option<Vacancies>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self {
            data: RegistrationData::default(),
            errors: FieldErrors::new(),
            touched: HashSet::new(),
            status: FormStatus::Editing,
            form_error: None,
            vacancies: None,
        }
    }

    pub fn data(&self) -> &RegistrationData {
        &self.data
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// No edits while a submission is pending or its confirmation is shown
    fn is_locked(&self) -> bool {
        matches!(self.status, FormStatus::Submitting | FormStatus::Succeeded(_))
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Error to display next to a field; hidden until the field is touched
    pub fn visible_error(&self, field: FormField) -> Option<&str> {
        if self.is_touched(field) { self.error(field) } else { None }
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    /// Set a text field. CPF and phone are masked as they are typed.
    ///
    /// The participation day is not a text field; use `select_day`.
    pub fn set_field(&mut self, field: FormField, value: &str) {
        if self.is_locked() {
            return;
        }

        match field {
            FormField::Name => self.data.name = value.to_string(),
            FormField::Cpf => self.data.cpf = format_cpf(value),
            FormField::Email => self.data.email = value.to_string(),
            FormField::Phone => self.data.phone = format_phone(value),
            FormField::Institution => self.data.institution = value.to_string(),
            FormField::Role => self.data.role = value.to_string(),
            FormField::ParticipationDay => match value.parse::<ParticipationDay>() {
                Ok(day) => {
                    self.select_day(day);
                    return;
                }
                Err(_) => self.data.participation_day = None,
            },
        }

        self.after_change(field);
    }

    /// Mark a field touched and validate it
    pub fn blur(&mut self, field: FormField) {
        self.touched.insert(field);
        self.revalidate(field);
    }

    /// Replace capacity counts used to disable exhausted day options
    pub fn set_vacancies(&mut self, vacancies: Vacancies) {
        self.vacancies = Some(vacancies);
    }

    /// Fetch capacity counts; failures leave every option enabled
    pub async fn load_vacancies(&mut self, api: &ApiClient) {
        match api.fetch_vacancies().await {
            Ok(vacancies) => self.set_vacancies(vacancies),
            Err(e) => tracing::error!(error = %e, "Failed to load remaining capacity"),
        }
    }

    pub fn availability(&self, day: ParticipationDay) -> DayAvailability {
        match &self.vacancies {
            Some(v) => DayAvailability {
                day,
                exhausted: v.is_exhausted(day),
                remaining: Some(v.remaining(day)),
            },
            None => DayAvailability {
                day,
                exhausted: false,
                remaining: None,
            },
        }
    }

    /// Select a participation day. Exhausted options are refused.
    pub fn select_day(&mut self, day: ParticipationDay) -> bool {
        if self.is_locked() || self.availability(day).exhausted {
            debug!(day = %day, "Ignoring selection of unavailable day");
            return false;
        }

        self.data.participation_day = Some(day);
        self.touched.insert(FormField::ParticipationDay);
        self.after_change(FormField::ParticipationDay);
        true
    }

    /// Validate the whole form and, when valid, enter `Submitting`.
    ///
    /// Returns the request to send, or `None` if submission is blocked by
    /// field errors, by a submission already in flight or by an open confirmation.
    pub fn begin_submit(&mut self) -> Option<RegistrationRequest> {
        if self.is_locked() {
            return None;
        }

        self.touched.extend(FormField::ALL);
        self.errors = validate(&self.data);
        self.form_error = None;

        if !self.errors.is_empty() {
            debug!(invalid_fields = self.errors.len(), "Registration blocked by validation");
            return None;
        }

        let day = self.data.participation_day?;
        self.status = FormStatus::Submitting;
        Some(self.data.to_request(day))
    }

    /// Apply the backend's answer to a submission started by `begin_submit`
    pub fn finish_submit(&mut self, result: Result<Value, PortalError>) {
        if !self.is_submitting() {
            return;
        }

        match result {
            Ok(_) => {
                log_registration(&self.data.cpf, true, None);
                self.status = FormStatus::Succeeded(Confirmation {
                    name: self.data.name.clone(),
                    email: self.data.email.clone(),
                });
            }
            Err(PortalError::DuplicateCpf(message)) => {
                log_registration(&self.data.cpf, false, Some(&message));
                self.errors.insert(FormField::Cpf, DUPLICATE_CPF_ERROR.to_string());
                self.status = FormStatus::Failed;
            }
            Err(e) => {
                let message = e.user_message(REGISTRATION_FALLBACK);
                log_registration(&self.data.cpf, false, Some(&message));
                self.form_error = Some(message);
                self.status = FormStatus::Failed;
            }
        }
    }

    /// Validate, send and apply the answer in one go
    pub async fn submit(&mut self, api: &ApiClient) -> &FormStatus {
        if let Some(request) = self.begin_submit() {
            let result = api.submit_registration(&request).await;
            self.finish_submit(result);
        }
        &self.status
    }

    /// Dismiss the success confirmation and start over with a blank form
    pub fn close_confirmation(&mut self) {
        if let FormStatus::Succeeded(_) = self.status {
            self.data = RegistrationData::default();
            self.touched.clear();
            self.errors.clear();
            self.form_error = None;
            self.status = FormStatus::Editing;
        }
    }

    fn after_change(&mut self, field: FormField) {
        if self.status == FormStatus::Failed {
            self.status = FormStatus::Editing;
        }
        if self.is_touched(field) {
            self.revalidate(field);
        }
    }

    fn revalidate(&mut self, field: FormField) {
        match validate(&self.data).remove(&field) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayVacancy;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set_field(FormField::Name, "Maria da Silva");
        form.set_field(FormField::Cpf, "11144477735");
        form.set_field(FormField::Email, "maria@escola.com");
        form.set_field(FormField::Phone, "99988887777");
        form.set_field(FormField::Institution, "E.M. Centro");
        form.set_field(FormField::Role, "Professor(a)");
        assert!(form.select_day(ParticipationDay::Day1));
        form
    }

    fn vacancies(day1: i64, day2: i64) -> Vacancies {
        Vacancies {
            day1: DayVacancy { total: 0, max: 500, available: day1 },
            day2: DayVacancy { total: 0, max: 500, available: day2 },
        }
    }

    #[test]
    fn test_masks_applied_on_change() {
        let form = filled_form();
        assert_eq!(form.data().cpf, "111.444.777-35");
        assert_eq!(form.data().phone, "(99) 98888-7777");
    }

    #[test]
    fn test_untouched_field_is_not_validated_on_change() {
        let mut form = RegistrationForm::new();
        form.set_field(FormField::Name, "Ana");
        assert!(form.error(FormField::Name).is_none());

        form.blur(FormField::Name);
        assert_eq!(form.error(FormField::Name), Some(NAME_ERROR));

        form.set_field(FormField::Name, "Ana Paula");
        assert!(form.error(FormField::Name).is_none());
    }

    #[test]
    fn test_visible_error_waits_for_touch() {
        let mut form = RegistrationForm::new();
        form.set_field(FormField::Email, "maria@");
        form.begin_submit();
        assert_eq!(form.visible_error(FormField::Email), Some(EMAIL_ERROR));

        let mut fresh = RegistrationForm::new();
        fresh.set_field(FormField::Email, "maria@");
        assert!(fresh.visible_error(FormField::Email).is_none());
        fresh.blur(FormField::Email);
        assert_eq!(fresh.visible_error(FormField::Email), Some(EMAIL_ERROR));
    }

    #[test]
    fn test_blur_only_recomputes_that_field() {
        let mut form = RegistrationForm::new();
        form.blur(FormField::Email);

        assert_eq!(form.error(FormField::Email), Some(EMAIL_ERROR));
        assert_eq!(form.errors().len(), 1);
    }

    #[test]
    fn test_submit_blocks_and_reports_exactly_invalid_fields() {
        let mut form = filled_form();
        form.set_field(FormField::Email, "maria@escola");
        form.set_field(FormField::Institution, "EM");

        assert!(form.begin_submit().is_none());
        assert_eq!(form.status(), &FormStatus::Editing);

        let invalid: Vec<FormField> = form.errors().keys().copied().collect();
        assert_eq!(invalid, vec![FormField::Email, FormField::Institution]);
        assert!(FormField::ALL.iter().all(|f| form.is_touched(*f)));
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let mut form = RegistrationForm::new();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.errors().len(), FormField::ALL.len());
        assert_eq!(form.error(FormField::ParticipationDay), Some(DAY_ERROR));
        assert_eq!(form.error(FormField::Role), Some(ROLE_ERROR));
    }

    #[test]
    fn test_role_placeholder_is_invalid() {
        let mut form = filled_form();
        form.set_field(FormField::Role, ROLE_PLACEHOLDER);
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error(FormField::Role), Some(ROLE_ERROR));
    }

    #[test]
    fn test_successful_submission_and_reset() {
        let mut form = filled_form();
        let request = form.begin_submit().expect("form is valid");
        assert_eq!(request.participation_day, ParticipationDay::Day1);
        assert!(form.is_submitting());

        // A second submit while the first is pending is refused
        assert!(form.begin_submit().is_none());

        form.finish_submit(Ok(json!({ "id": 1 })));
        assert_matches!(form.status(), FormStatus::Succeeded(c) if c.name == "Maria da Silva" && c.email == "maria@escola.com");

        form.close_confirmation();
        assert_eq!(form.status(), &FormStatus::Editing);
        assert_eq!(form.data(), &RegistrationData::default());
        assert!(form.errors().is_empty());
        assert!(!form.is_touched(FormField::Name));
    }

    #[test]
    fn test_confirmation_locks_form_until_closed() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.finish_submit(Ok(json!({ "id": 1 })));

        form.set_field(FormField::Name, "Outra Pessoa Qualquer");
        assert!(!form.select_day(ParticipationDay::Day2));
        assert!(form.begin_submit().is_none());

        assert_eq!(form.data().name, "Maria da Silva");
        assert_eq!(form.data().participation_day, Some(ParticipationDay::Day1));
        assert_matches!(form.status(), FormStatus::Succeeded(c) if c.name == "Maria da Silva");

        form.close_confirmation();
        form.set_field(FormField::Name, "Outra Pessoa Qualquer");
        assert_eq!(form.data().name, "Outra Pessoa Qualquer");
    }

    #[test]
    fn test_duplicate_cpf_attaches_to_cpf_only() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.finish_submit(Err(PortalError::DuplicateCpf("CPF já inscrito".to_string())));

        assert_eq!(form.status(), &FormStatus::Failed);
        assert_eq!(form.error(FormField::Cpf), Some(DUPLICATE_CPF_ERROR));
        assert_eq!(form.errors().len(), 1);
        assert!(form.form_error().is_none());
    }

    #[test]
    fn test_generic_rejection_becomes_form_error() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.finish_submit(Err(PortalError::Api { status: 400, message: "Inscrições encerradas".to_string() }));

        assert_eq!(form.form_error(), Some("Inscrições encerradas"));
        assert!(form.errors().is_empty());

        // Editing again leaves the failed state
        form.set_field(FormField::Name, "Maria da Silva Santos");
        assert_eq!(form.status(), &FormStatus::Editing);
    }

    #[test]
    fn test_exhausted_day_cannot_be_selected() {
        let mut form = RegistrationForm::new();
        form.set_vacancies(vacancies(0, 10));

        assert!(!form.select_day(ParticipationDay::Day1));
        assert!(!form.select_day(ParticipationDay::Both));
        assert!(form.data().participation_day.is_none());

        assert!(form.select_day(ParticipationDay::Day2));
        assert_eq!(form.data().participation_day, Some(ParticipationDay::Day2));

        let both = form.availability(ParticipationDay::Both);
        assert!(both.exhausted);
        assert_eq!(both.remaining, Some(0));
    }

    #[test]
    fn test_unknown_capacity_leaves_options_enabled() {
        let form = RegistrationForm::new();
        let availability = form.availability(ParticipationDay::Both);
        assert!(!availability.exhausted);
        assert!(availability.remaining.is_none());
    }
}
