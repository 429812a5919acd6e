//! Command-line front end
//!
//! Each subcommand drives one controller or panel against the backend and
//! prints the outcome. Messages shown to the operator are the same ones the
//! controllers expose.

use std::path::PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use crate::handlers::admin::participants::{self, ParticipantFilter};
use crate::handlers::admin::{
    evaluations, AdminForm, CertificatesPanel, DashboardPanel, EvaluationsPanel, Feedback, LoginForm,
    ParticipantsPanel, SettingsPanel, UsersPanel,
};
use crate::models::registration::remaining_label;
use crate::models::evaluation::star_label;
use crate::models::{ParticipationDay, RatingCategory, ROLE_OPTIONS};
use crate::services::ServiceFactory;
use crate::state::{EvaluationFlow, EvaluationStep, FormField, FormStatus, RegistrationForm};
use crate::utils::errors::{PortalError, Result};
use crate::utils::helpers::{format_date_br, normalize_whitespace, proportion_bar, truncate_text};

/// Jornada Pedagógica portal client
#[derive(Parser, Debug)]
#[command(name = "jornada")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file, extension optional
    #[arg(short = 'c', long, env = "JORNADA_CONFIG_FILE", default_value = "config")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the current event settings
    Settings,

    /// Register a participant
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        cpf: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        institution: String,
        /// One of the offered roles, e.g. "Professor(a)"
        #[arg(long, value_parser = parse_role)]
        role: String,
        /// dia1, dia2 or ambos
        #[arg(long)]
        day: String,
    },

    /// Submit the event evaluation
    Evaluate {
        #[arg(long)]
        cpf: String,
        #[arg(long)]
        overall: u8,
        #[arg(long)]
        content: u8,
        #[arg(long)]
        organization: u8,
        #[arg(long)]
        speakers: u8,
        #[arg(long)]
        comment: Option<String>,
        #[arg(long)]
        suggestion: Option<String>,
    },

    /// Log in as an organizer
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "JORNADA_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Drop the stored session
    Logout,

    /// Registration totals
    Dashboard,

    /// List registrations
    Participants {
        /// todos, presentes or ausentes
        #[arg(long, default_value = "todos")]
        filter: String,
        #[arg(long)]
        search: Option<String>,
    },

    /// Toggle check-in for a registration
    TogglePresence { id: i64 },

    /// Delete a registration
    DeleteRegistration {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Download a CSV export
    Export {
        #[arg(value_enum)]
        kind: ExportKind,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Certificate counters, generation and delivery
    Certificates {
        #[arg(long, conflicts_with = "send")]
        generate: bool,
        #[arg(long)]
        send: bool,
    },

    /// Evaluation statistics
    Evaluations,

    /// Manage organizer accounts
    Admins {
        #[command(subcommand)]
        action: Option<AdminCommand>,
    },

    /// Change event settings, e.g. --set event_name="Jornada 2027"
    UpdateSettings {
        #[arg(long = "set", value_parser = parse_key_value, required = true)]
        values: Vec<(String, String)>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Leave out to keep the current password
        #[arg(long)]
        password: Option<String>,
    },
    Delete { id: i64 },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    Participantes,
    Avaliacoes,
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))
}

/// Match a role against the offered options, ignoring case
fn parse_role(raw: &str) -> std::result::Result<String, String> {
    let raw = raw.trim();
    ROLE_OPTIONS
        .iter()
        .find(|option| option.to_lowercase() == raw.to_lowercase())
        .map(|option| option.to_string())
        .ok_or_else(|| format!("unknown role `{}`; expected one of: {}", raw, ROLE_OPTIONS.join(", ")))
}

/// Run one subcommand
pub async fn run(command: Command, services: &ServiceFactory) -> Result<()> {
    let api = &services.api;

    match command {
        Command::Settings => {
            let settings = services.event_settings.snapshot();
            println!("{}", settings.name);
            println!("Data: {}", settings.date);
            println!("Local: {}", settings.location);
            println!("Carga horária: {}h", settings.workload_hours);
            println!("Vagas: {} (1º dia) / {} (2º dia)", settings.capacity_day1, settings.capacity_day2);
            Ok(())
        }

        Command::Register { name, cpf, email, phone, institution, role, day } => {
            let mut form = RegistrationForm::new();
            form.load_vacancies(api).await;

            form.set_field(FormField::Name, &normalize_whitespace(&name));
            form.set_field(FormField::Cpf, &cpf);
            form.set_field(FormField::Email, email.trim());
            form.set_field(FormField::Phone, &phone);
            form.set_field(FormField::Institution, &institution);
            form.set_field(FormField::Role, &role);

            let day: ParticipationDay = day.parse()?;
            if !form.select_day(day) {
                let availability = form.availability(day);
                return Err(PortalError::Validation(format!(
                    "{} indisponível ({})",
                    day.label(),
                    remaining_label(availability.remaining.unwrap_or(0))
                )));
            }

            let status = form.submit(api).await.clone();
            match status {
                FormStatus::Succeeded(confirmation) => {
                    println!("Inscrição confirmada para {} ({})", confirmation.name, confirmation.email);
                    println!("{}: {}", day.label(), day.audience());
                    Ok(())
                }
                _ => {
                    for field in FormField::ALL {
                        if let Some(message) = form.visible_error(field) {
                            eprintln!("{}: {}", field.label(), message);
                        }
                    }
                    let message = form
                        .form_error()
                        .map(str::to_string)
                        .unwrap_or_else(|| "Corrija os campos destacados".to_string());
                    Err(PortalError::Validation(message))
                }
            }
        }

        Command::Evaluate { cpf, overall, content, organization, speakers, comment, suggestion } => {
            let mut flow = EvaluationFlow::new();
            flow.set_cpf(&cpf);
            flow.advance()?;

            let stars = [overall, content, organization, speakers];
            for (category, value) in RatingCategory::ALL.into_iter().zip(stars) {
                flow.rate(category, value)?;
            }
            if let Some(comment) = comment {
                flow.set_comment(&comment);
            }
            if let Some(suggestion) = suggestion {
                flow.set_suggestion(&suggestion);
            }

            match flow.submit(api).await {
                EvaluationStep::Completed => {
                    println!("Avaliação enviada. Obrigado!");
                    Ok(())
                }
                _ => Err(PortalError::Validation(flow.error().unwrap_or_default().to_string())),
            }
        }

        Command::Login { email, password } => {
            let mut form = LoginForm::new(&email, &password);
            form.submit(api).await?;
            info!(email = %form.email, "Logged in");
            println!("Sessão iniciada para {}", form.email);
            Ok(())
        }

        Command::Logout => {
            api.logout()?;
            println!("Sessão encerrada");
            Ok(())
        }

        Command::Dashboard => {
            let mut panel = DashboardPanel::new();
            panel.load(api).await;
            fail_on_panel_error(panel.state().error())?;

            if let Some(stats) = panel.stats() {
                println!("Inscritos: {}", stats.total);
                println!("Presentes: {} ({:.1}%)", stats.present, panel.attendance_rate());
                println!("Ausentes: {}", stats.absent);
                println!("Certificados enviados: {}", stats.certificates_sent);
                for institution in &stats.by_institution {
                    println!("  {:<40} {}", truncate_text(&institution.name, 40), institution.count);
                }
                for recent in &stats.recent {
                    println!(
                        "  {}  {} ({}, {})",
                        format_date_br(&recent.registered_at),
                        recent.name,
                        recent.role,
                        recent.institution
                    );
                }
            }
            Ok(())
        }

        Command::Participants { filter, search } => {
            let mut panel = ParticipantsPanel::new();
            panel.set_filter(filter.parse::<ParticipantFilter>()?);
            if let Some(search) = search {
                panel.set_search(&search);
            }
            panel.load(api).await;
            fail_on_panel_error(panel.state().error())?;

            let visible = panel.visible();
            for p in &visible {
                let mark = if p.present { "✔" } else { " " };
                let day = p.participation_day.map(|d| d.as_str()).unwrap_or("-");
                println!(
                    "[{}] {:>5}  {}  {:<30} {:<30} {}",
                    mark,
                    p.id,
                    p.cpf,
                    truncate_text(&p.name, 30),
                    truncate_text(&p.institution, 30),
                    day
                );
            }
            let totals = panel.totals();
            println!(
                "Exibindo {} de {} ({} presentes, {} ausentes)",
                visible.len(),
                totals.total,
                totals.present,
                totals.absent
            );
            Ok(())
        }

        Command::TogglePresence { id } => {
            let mut panel = ParticipantsPanel::new();
            let present = panel.toggle_presence(api, id).await?;
            println!("Inscrição {}: {}", id, if present { "presente" } else { "ausente" });
            Ok(())
        }

        Command::DeleteRegistration { id, yes } => {
            let mut panel = ParticipantsPanel::new();
            if !yes {
                panel.load(api).await;
                fail_on_panel_error(panel.state().error())?;
                let name = panel
                    .participants()
                    .iter()
                    .find(|p| p.id == id)
                    .map(|p| p.name.clone())
                    .ok_or_else(|| PortalError::Validation(format!("Inscrição {} não encontrada", id)))?;
                if !confirm(&participants::delete_confirmation(&name))? {
                    return Ok(());
                }
            }
            panel.delete(api, id).await?;
            println!("Inscrição {} excluída", id);
            Ok(())
        }

        Command::Export { kind, output } => {
            let (csv, default_name) = match kind {
                ExportKind::Participantes => {
                    let mut panel = ParticipantsPanel::new();
                    (panel.export(api).await?, participants::EXPORT_FILE_NAME)
                }
                ExportKind::Avaliacoes => {
                    let panel = EvaluationsPanel::new();
                    let csv = panel.export(api).await.map_err(|e| {
                        PortalError::Validation(evaluations::export_error_message(&e))
                    })?;
                    (csv, evaluations::EXPORT_FILE_NAME)
                }
            };
            let path = output.unwrap_or_else(|| PathBuf::from(default_name));
            tokio::fs::write(&path, csv).await?;
            println!("Exportado para {}", path.display());
            Ok(())
        }

        Command::Certificates { generate, send } => {
            let mut panel = CertificatesPanel::new();
            panel.load(api).await;
            fail_on_panel_error(panel.state().error())?;

            if generate {
                panel.generate(api).await?;
            } else if send {
                if !panel.can_send() {
                    return Err(PortalError::Validation("Gere os certificados antes de enviar".to_string()));
                }
                panel.send(api).await?;
            }
            print_feedback(panel.feedback());

            let stats = panel.stats();
            println!("Presentes: {}", stats.total_present);
            println!("Gerados: {}", stats.generated);
            println!("Enviados: {}", stats.sent);
            println!("Pendentes: {}", stats.pending);
            Ok(())
        }

        Command::Evaluations => {
            let mut panel = EvaluationsPanel::new();
            panel.load(api).await;
            fail_on_panel_error(panel.state().error())?;

            if let Some(stats) = panel.stats() {
                println!("Avaliações: {} de {} ({:.1}%)", stats.total_evaluations, stats.total_registrations, stats.response_rate);
                println!("Média geral: {:.1}", stats.overall_average);
                for category in RatingCategory::ALL {
                    let average = match category {
                        RatingCategory::Overall => stats.averages.overall,
                        RatingCategory::Content => stats.averages.content,
                        RatingCategory::Organization => stats.averages.organization,
                        RatingCategory::Speakers => stats.averages.speakers,
                    };
                    println!("  {:<16} {:.1}", category.label(), average);
                }
                for row in panel.distribution() {
                    println!(
                        "  {} {:<10} {:<20} {}",
                        row.stars,
                        star_label(row.stars),
                        proportion_bar(row.count, stats.max_bucket(), 20),
                        row.count
                    );
                }
                for comment in &stats.comments {
                    println!("  \"{}\" ({})", truncate_text(&comment.comment, 80), comment.name);
                }
            }
            Ok(())
        }

        Command::Admins { action } => {
            let mut panel = UsersPanel::new();
            let action = action.unwrap_or(AdminCommand::List);
            let listing = matches!(action, AdminCommand::List);
            match action {
                AdminCommand::List => panel.load(api).await,
                AdminCommand::Create { name, email, password } => {
                    panel.save(api, &AdminForm::create(&name, &email, &password)).await?;
                }
                AdminCommand::Update { id, name, email, password } => {
                    let form = AdminForm {
                        editing: Some(id),
                        name,
                        email,
                        password: password.unwrap_or_default(),
                    };
                    panel.save(api, &form).await?;
                }
                AdminCommand::Delete { id } => panel.delete(api, id).await?,
            }
            print_feedback(panel.feedback());
            if !listing {
                return Ok(());
            }
            fail_on_panel_error(panel.state().error())?;

            for admin in panel.admins() {
                let created = admin.created_at.as_deref().map(format_date_br).unwrap_or_default();
                println!("{:>5}  {:<30} {:<35} {}", admin.id, admin.name, admin.email, created);
            }
            Ok(())
        }

        Command::UpdateSettings { values } => {
            let mut panel = SettingsPanel::new();
            panel.load(api).await;
            fail_on_panel_error(panel.state().error())?;

            for (key, value) in &values {
                panel.set(key, value)?;
            }
            let snapshot = panel.save(api, &services.event_settings).await?;
            print_feedback(panel.feedback());
            println!("{} | {} | {}", snapshot.name, snapshot.date, snapshot.location);
            Ok(())
        }
    }
}

fn fail_on_panel_error(error: Option<&str>) -> Result<()> {
    match error {
        Some(message) => Err(PortalError::Validation(message.to_string())),
        None => Ok(()),
    }
}

fn print_feedback(feedback: Option<&Feedback>) {
    match feedback {
        Some(f) if f.is_error() => eprintln!("{}", f.message()),
        Some(f) => println!("{}", f.message()),
        None => {}
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    use std::io::{BufRead, Write};

    print!("{} [s/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes"))
}
