//! Jornada Portal CLI
//!
//! Main application entry point

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info};

use JornadaPortal::{
    config::Settings,
    handlers::cli::{self, Cli},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Cli::parse();

    // Load configuration
    let settings = Settings::from_file(&args.config).context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", JornadaPortal::info());

    // Initialize services
    let services = ServiceFactory::new(settings).context("failed to initialize services")?;
    services.bootstrap().await;

    for issue in services.health_check().get_issues() {
        debug!(issue = %issue, "Service health");
    }

    if let Err(e) = cli::run(args.command, &services).await {
        error!(severity = %e.severity(), recoverable = e.is_recoverable(), error = %e, "Command failed");
        if e.requires_login() {
            eprintln!("{}. Faça login com `jornada login`.", e.user_message(""));
        } else {
            eprintln!("{}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
