//! State management module
//!
//! This module holds the client-side state machines for the public flows:
//! the registration form and the evaluation survey

pub mod evaluation;
pub mod registration;

// Re-export commonly used state components
pub use evaluation::{EvaluationFlow, EvaluationStep, Ratings};
pub use registration::{Confirmation, DayAvailability, FieldErrors, FormField, FormStatus, RegistrationData, RegistrationForm};
