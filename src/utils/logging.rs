//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the JornadaPortal application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must live as long
/// as the program logs.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let (file_layer, guard) = if config.file_path.is_empty() {
        (None, None)
    } else {
        let file_appender = tracing_appender::rolling::daily(&config.file_path, "jornada.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking);
        (Some(layer), Some(guard))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a registration submission outcome
pub fn log_registration(cpf_digits: &str, success: bool, details: Option<&str>) {
    let masked = mask_cpf_for_log(cpf_digits);
    if success {
        info!(cpf = %masked, "Registration submitted");
    } else {
        warn!(cpf = %masked, details = details, "Registration rejected");
    }
}

/// Log an evaluation submission outcome
pub fn log_evaluation(cpf_digits: &str, success: bool, details: Option<&str>) {
    let masked = mask_cpf_for_log(cpf_digits);
    if success {
        info!(cpf = %masked, "Evaluation submitted");
    } else {
        warn!(cpf = %masked, details = details, "Evaluation rejected");
    }
}

/// Log admin actions
pub fn log_admin_action(action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        action = action,
        subject = target,
        details = details,
        "Admin action performed"
    );
}

/// Log API errors with context
pub fn log_api_error(endpoint: &str, status: Option<u16>, error: &str) {
    error!(
        endpoint = endpoint,
        status = status,
        error = error,
        "API error occurred"
    );
}

/// Log a completed API request
pub fn log_api_request(method: &str, endpoint: &str, status: u16, duration_ms: u64) {
    debug!(
        method = method,
        endpoint = endpoint,
        status = status,
        duration_ms = duration_ms,
        "API request completed"
    );
}

/// Keep only the last two digits of a CPF for log output
pub fn mask_cpf_for_log(cpf_digits: &str) -> String {
    let digits = super::validators::only_digits(cpf_digits);
    let visible = digits.len().saturating_sub(2);
    format!("{}{}", "*".repeat(visible), &digits[visible..])
}
