//! Evaluation flow controller
//!
//! Two steps and a terminal state: `CpfEntry -> Rating -> Completed`.
//! Once completed the flow accepts no further input.

use serde_json::Value;
use crate::models::{EvaluationRequest, RatingCategory};
use crate::services::ApiClient;
use crate::services::api::EVALUATION_FALLBACK;
use crate::utils::errors::{PortalError, Result};
use crate::utils::logging::log_evaluation;
use crate::utils::validators::{format_cpf, only_digits, CPF_LENGTH};

pub const CPF_STEP_ERROR: &str = "Por favor, informe um CPF válido com 11 dígitos.";
pub const RATINGS_ERROR: &str = "Por favor, avalie todas as categorias.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationStep {
    CpfEntry,
    Rating,
    Completed,
}

impl EvaluationStep {
    fn name(&self) -> &'static str {
        match self {
            EvaluationStep::CpfEntry => "cpf_entry",
            EvaluationStep::Rating => "rating",
            EvaluationStep::Completed => "completed",
        }
    }
}

/// Star ratings; zero means not rated yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ratings {
    pub overall: u8,
    pub content: u8,
    pub organization: u8,
    pub speakers: u8,
}

impl Ratings {
    pub fn get(&self, category: RatingCategory) -> u8 {
        match category {
            RatingCategory::Overall => self.overall,
            RatingCategory::Content => self.content,
            RatingCategory::Organization => self.organization,
            RatingCategory::Speakers => self.speakers,
        }
    }

    fn set(&mut self, category: RatingCategory, stars: u8) {
        match category {
            RatingCategory::Overall => self.overall = stars,
            RatingCategory::Content => self.content = stars,
            RatingCategory::Organization => self.organization = stars,
            RatingCategory::Speakers => self.speakers = stars,
        }
    }

    pub fn is_complete(&self) -> bool {
        RatingCategory::ALL.iter().all(|c| self.get(*c) != 0)
    }
}

#[derive(Debug, Clone)]
pub struct EvaluationFlow {
    step: EvaluationStep,
    cpf: String,
    ratings: Ratings,
    comment: String,
    suggestion: String,
    error: Option<String>,
    submitting: bool,
}

impl EvaluationFlow {
    pub fn new() -> Self {
        Self {
            step: EvaluationStep::CpfEntry,
            cpf: String::new(),
            ratings: Ratings::default(),
            comment: String::new(),
            suggestion: String::new(),
            error: None,
            submitting: false,
        }
    }

    pub fn step(&self) -> EvaluationStep {
        self.step
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn ratings(&self) -> Ratings {
        self.ratings
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// CPF digits as entered
    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    /// CPF as shown in the input, masked
    pub fn cpf_display(&self) -> String {
        format_cpf(&self.cpf)
    }

    /// Store the CPF input, keeping digits only
    pub fn set_cpf(&mut self, input: &str) {
        if self.step == EvaluationStep::CpfEntry {
            self.cpf = only_digits(input);
        }
    }

    /// Leave the CPF step. Needs exactly 11 digits; the checksum is left to the backend.
    pub fn advance(&mut self) -> Result<()> {
        self.expect_step(EvaluationStep::CpfEntry, EvaluationStep::Rating)?;

        if self.cpf.len() != CPF_LENGTH {
            self.error = Some(CPF_STEP_ERROR.to_string());
            return Err(PortalError::Validation(CPF_STEP_ERROR.to_string()));
        }

        self.error = None;
        self.step = EvaluationStep::Rating;
        Ok(())
    }

    /// Return from the rating step to the CPF step
    pub fn back(&mut self) -> Result<()> {
        self.expect_step(EvaluationStep::Rating, EvaluationStep::CpfEntry)?;
        if self.submitting {
            return Err(self.transition_error(EvaluationStep::CpfEntry));
        }

        self.error = None;
        self.step = EvaluationStep::CpfEntry;
        Ok(())
    }

    /// Rate one category with 1 to 5 stars
    pub fn rate(&mut self, category: RatingCategory, stars: u8) -> Result<()> {
        if self.step != EvaluationStep::Rating {
            return Err(self.transition_error(EvaluationStep::Rating));
        }
        if !(1..=5).contains(&stars) {
            return Err(PortalError::Validation(format!("Nota inválida: {}", stars)));
        }

        self.ratings.set(category, stars);
        Ok(())
    }

    pub fn set_comment(&mut self, comment: &str) {
        if self.step == EvaluationStep::Rating {
            self.comment = comment.to_string();
        }
    }

    pub fn set_suggestion(&mut self, suggestion: &str) {
        if self.step == EvaluationStep::Rating {
            self.suggestion = suggestion.to_string();
        }
    }

    /// Check ratings and enter the submitting state, returning the body to send
    pub fn begin_submit(&mut self) -> Result<EvaluationRequest> {
        if self.step != EvaluationStep::Rating || self.submitting {
            return Err(self.transition_error(EvaluationStep::Completed));
        }

        self.error = None;
        if !self.ratings.is_complete() {
            self.error = Some(RATINGS_ERROR.to_string());
            return Err(PortalError::Validation(RATINGS_ERROR.to_string()));
        }

        self.submitting = true;
        Ok(EvaluationRequest {
            cpf: self.cpf.clone(),
            overall: self.ratings.overall,
            content: self.ratings.content,
            organization: self.ratings.organization,
            speakers: self.ratings.speakers,
            comment: non_empty(&self.comment),
            suggestion: non_empty(&self.suggestion),
        })
    }

    /// Apply the backend's answer to a submission started by `begin_submit`
    pub fn finish_submit(&mut self, result: Result<Value>) {
        if !self.submitting {
            return;
        }
        self.submitting = false;

        match result {
            Ok(_) => {
                log_evaluation(&self.cpf, true, None);
                self.step = EvaluationStep::Completed;
            }
            Err(e) => {
                let message = e.user_message(EVALUATION_FALLBACK);
                log_evaluation(&self.cpf, false, Some(&message));
                self.error = Some(message);
            }
        }
    }

    /// Validate, send and apply the answer in one go
    pub async fn submit(&mut self, api: &ApiClient) -> EvaluationStep {
        if let Ok(request) = self.begin_submit() {
            let result = api.submit_evaluation(&request).await;
            self.finish_submit(result);
        }
        self.step
    }

    fn expect_step(&self, expected: EvaluationStep, to: EvaluationStep) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(self.transition_error(to))
        }
    }

    fn transition_error(&self, to: EvaluationStep) -> PortalError {
        PortalError::InvalidStateTransition {
            from: self.step.name().to_string(),
            to: to.name().to_string(),
        }
    }
}

impl Default for EvaluationFlow {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() { None } else { Some(text.to_string()) }
}
