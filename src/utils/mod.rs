//! Utility modules
//!
//! This module contains common utilities used throughout the application,
//! including error handling, logging setup, input masks and helper functions.

pub mod errors;
pub mod logging;
pub mod helpers;
pub mod validators;

pub use errors::{PortalError, Result};
pub use validators::{format_cpf, format_phone, only_digits, validate_cpf, validate_email};
