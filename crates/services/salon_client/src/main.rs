// --- File: crates/services/salon_client/src/main.rs ---
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use salon_booking::appointments::AppointmentFilter;
use salon_common::models::{EmployeeSelection, SlotTime};
use salon_common::{config_error, log_error, HttpStatusCode, SalonError};
use salon_config::load_config;
use tracing::info;

mod app_state;
mod commands;

use app_state::AppState;

/// Book and manage salon appointments from the terminal.
#[derive(Debug, Parser)]
#[command(name = "salon-client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show who is signed in.
    Whoami,
    /// List the bookable services.
    Services,
    /// Show the open days of a service, and the free slots on one of them.
    Availability {
        service_id: u32,
        /// Employee id, or `any`.
        #[arg(long, default_value = "any", value_parser = parse_employee)]
        employee: EmployeeSelection,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Login {
        email: String,
        password: String,
    },
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Logout,
    /// Book a service. Anonymous bookings are kept until the next login.
    Book {
        service_id: u32,
        /// Employee id, or `any`.
        #[arg(value_parser = parse_employee)]
        employee: EmployeeSelection,
        date: NaiveDate,
        time: SlotTime,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Submit the booking saved before signing in.
    Resume,
    /// List your appointments (`all`, `upcoming` or `past`).
    My {
        #[arg(default_value = "all")]
        filter: AppointmentFilter,
    },
    Cancel {
        appointment_id: u32,
    },
    /// Show or change the admin sidebar preference.
    Sidebar {
        #[arg(value_enum)]
        action: Option<SidebarAction>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SidebarAction {
    Open,
    Closed,
    Toggle,
}

fn parse_employee(raw: &str) -> Result<EmployeeSelection, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("any") {
        return Ok(EmployeeSelection::NoPreference);
    }
    raw.parse::<u32>()
        .map(EmployeeSelection::Specific)
        .map_err(|_| format!("expected an employee id or `any`, got '{}'", raw))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config().map_err(config_error) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = salon_common::init_with_config(&config.logging);

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(err) => {
            log_error(&err, "Failed to start");
            return ExitCode::FAILURE;
        }
    };

    // Every command sees the same restored session.
    if let Some(session) = state.session.restore().await {
        info!("Signed in as {}", session.profile.email);
    }

    match commands::run(&state, cli.command).await {
        Ok(code) => code,
        Err(err) => {
            log_error(&err, "Command failed");
            eprintln!("Error: {}", err);
            exit_code(&err)
        }
    }
}

/// Maps a failed command onto the process exit status by HTTP status class.
fn exit_code(err: &SalonError) -> ExitCode {
    match err.status_code() {
        401 | 403 => ExitCode::from(3),
        400..=499 => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
