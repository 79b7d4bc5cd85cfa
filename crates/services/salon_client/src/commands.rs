// --- File: crates/services/salon_client/src/commands.rs ---
//! One function per subcommand. Output goes to stdout, diagnostics to the log.

use std::process::ExitCode;

use chrono::NaiveDate;
use salon_booking::appointments::{can_cancel, AppointmentFilter};
use salon_booking::guard::{self, AdminSection, GuardDecision, Route};
use salon_booking::registration::RegistrationForm;
use salon_booking::wizard::Submission;
use salon_booking::{BookingFlow, FlowEvent, Loadable, Navigation, PendingBooking, Session};
use salon_common::models::{EmployeeSelection, SlotTime};
use salon_common::{internal_error, log_result, SalonError};
use tracing::{debug, warn};

use crate::app_state::AppState;
use crate::{Command, SidebarAction};

pub async fn run(state: &AppState, command: Command) -> Result<ExitCode, SalonError> {
    debug!("Running {:?}", command);
    match command {
        Command::Whoami => whoami(state),
        Command::Services => services(state).await,
        Command::Availability {
            service_id,
            employee,
            date,
        } => availability(state, service_id, employee, date).await,
        Command::Login { email, password } => {
            let session = state.session.login(email, password).await?;
            after_login(state, &session).await
        }
        Command::Register {
            first_name,
            last_name,
            email,
            phone,
            password,
            confirm_password,
        } => {
            let form = RegistrationForm {
                first_name,
                last_name,
                email,
                phone,
                password,
                confirm_password,
            };
            let session = state.session.register(&form).await?;
            after_login(state, &session).await
        }
        Command::Logout => {
            state.session.logout();
            println!("Signed out.");
            Ok(ExitCode::SUCCESS)
        }
        Command::Book {
            service_id,
            employee,
            date,
            time,
            notes,
        } => book(state, service_id, employee, date, time, notes).await,
        Command::Resume => resume(state).await,
        Command::My { filter } => my_appointments(state, filter).await,
        Command::Cancel { appointment_id } => cancel(state, appointment_id).await,
        Command::Sidebar { action } => sidebar(state, action),
    }
}

fn whoami(state: &AppState) -> Result<ExitCode, SalonError> {
    match state.session.current() {
        Some(session) => {
            let profile = &session.profile;
            println!(
                "{} {} <{}>{}",
                profile.first_name,
                profile.last_name,
                profile.email,
                if session.is_admin() { " (admin)" } else { "" }
            );
        }
        None => println!("Not signed in."),
    }
    Ok(ExitCode::SUCCESS)
}

/// Checks the page guard for `route`, telling the user where to go instead.
fn allowed(state: &AppState, route: Route) -> Result<bool, SalonError> {
    match guard::enter(route, &state.session.state(), &state.pending)? {
        GuardDecision::Allow => Ok(true),
        GuardDecision::Wait => Err(internal_error("session is still being restored")),
        GuardDecision::Redirect(Route::Login) => {
            println!("{} is reserved to administrators.", route);
            Ok(false)
        }
        GuardDecision::Redirect(target) => {
            println!(
                "Sign in first ({}): salon-client login <email> <password>",
                target
            );
            Ok(false)
        }
    }
}

async fn after_login(state: &AppState, session: &Session) -> Result<ExitCode, SalonError> {
    println!(
        "Signed in as {} {}.",
        session.profile.first_name, session.profile.last_name
    );
    match state.pending.post_login_destination() {
        Route::Booking => resume(state).await,
        destination => {
            println!("Continue at {}", destination);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn services(state: &AppState) -> Result<ExitCode, SalonError> {
    let mut flow = state.booking_flow();
    flow.load_catalog();
    flow.settle().await;

    match flow.wizard().catalog() {
        Loadable::Loaded(services) => {
            for service in services.iter().filter(|s| s.is_bookable()) {
                println!(
                    "{:>4}  {:<30} {:>4} min  {:>7.2} EUR",
                    service.id, service.name, service.duration, service.price
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        other => catalog_unavailable(other),
    }
}

fn catalog_unavailable<T>(catalog: &Loadable<T>) -> Result<ExitCode, SalonError> {
    let reason = catalog.error().unwrap_or("no answer");
    eprintln!("Services could not be loaded: {}", reason);
    Ok(ExitCode::FAILURE)
}

async fn availability(
    state: &AppState,
    service_id: u32,
    employee: EmployeeSelection,
    date: Option<NaiveDate>,
) -> Result<ExitCode, SalonError> {
    let mut flow = state.booking_flow();
    flow.load_catalog();
    flow.settle().await;
    if flow.wizard().catalog().loaded().is_none() {
        return catalog_unavailable(flow.wizard().catalog());
    }

    flow.select_service(service_id)?;
    flow.settle().await;

    let wizard = flow.wizard();
    let window = wizard.window();
    println!("Bookable from {} to {}", window.start, window.end);
    if let Some(roster) = wizard.roster().loaded() {
        for option in roster {
            let details = option
                .employee
                .as_ref()
                .map(|employee| {
                    [
                        employee.position.clone(),
                        employee.specialties.clone(),
                        employee.years_experience.map(|years| format!("{} yrs", years)),
                    ]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(", ")
                })
                .or_else(|| option.position.clone())
                .unwrap_or_default();
            println!("  {:>5}  {:<30} {}", option.selection, option.label, details);
        }
    }
    match wizard.days() {
        Loadable::Loaded(days) if !days.is_empty() => {
            let listed: Vec<String> = wizard
                .selectable_dates()
                .iter()
                .map(|day| day.format("%a %d %b").to_string())
                .collect();
            println!("Open days: {}", listed.join(", "));
        }
        Loadable::Failed(reason) => {
            warn!("Open days unavailable: {}", reason);
            println!("Open days unknown, every day in the window can be tried.");
        }
        _ => println!("Every day in the window can be tried."),
    }

    let Some(date) = date else {
        return Ok(ExitCode::SUCCESS);
    };
    flow.select_employee(employee)?;
    flow.select_date(date)?;
    flow.settle().await;
    print_slots(&flow, date);
    Ok(ExitCode::SUCCESS)
}

fn print_slots(flow: &BookingFlow, date: NaiveDate) {
    match flow.wizard().slots() {
        Loadable::Loaded(slots) if slots.is_empty() => {
            println!("No free slot on {}.", date)
        }
        Loadable::Loaded(slots) => {
            let listed: Vec<String> = slots.iter().map(ToString::to_string).collect();
            println!("Free slots on {}: {}", date, listed.join(" "));
        }
        Loadable::Failed(reason) => println!("Slots could not be loaded: {}", reason),
        _ => println!("Slots are still loading."),
    }
}

async fn book(
    state: &AppState,
    service_id: u32,
    employee: EmployeeSelection,
    date: NaiveDate,
    time: SlotTime,
    notes: Option<String>,
) -> Result<ExitCode, SalonError> {
    let mut flow = state.booking_flow();
    if let Some(event) = flow.mount().await {
        println!("A booking saved before signing in was submitted first.");
        return Ok(report(&flow, event));
    }
    flow.settle().await;
    if flow.wizard().catalog().loaded().is_none() {
        return catalog_unavailable(flow.wizard().catalog());
    }

    flow.select_service(service_id)?;
    flow.settle().await;
    flow.select_employee(employee)?;
    flow.select_date(date)?;
    flow.settle().await;
    if !flow
        .wizard()
        .slots()
        .loaded()
        .is_some_and(|slots| slots.contains(&time))
    {
        print_slots(&flow, date);
    }
    flow.select_time(time)?;
    if let Some(notes) = notes {
        flow.set_notes(notes)?;
    }

    let event = flow.confirm().await?;
    Ok(report(&flow, event))
}

async fn resume(state: &AppState) -> Result<ExitCode, SalonError> {
    if state.session.current().is_none() {
        println!("Sign in first: salon-client login <email> <password>");
        return Ok(ExitCode::FAILURE);
    }
    if !state.pending.exists() {
        println!("No saved booking.");
        return Ok(ExitCode::SUCCESS);
    }

    let mut flow = state.booking_flow();
    let event = flow.mount().await;
    flow.settle().await;
    match event {
        Some(event) => Ok(report(&flow, event)),
        None => {
            println!("The saved booking could not be restored; please book again.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn booking_summary(booked: &PendingBooking) -> Option<String> {
    let draft = &booked.booking_data;
    Some(format!(
        "Booked {} with {} on {} at {}.",
        booked.selected_service.name,
        booked.selected_employee.label,
        draft.date?,
        draft.time?
    ))
}

fn report(flow: &BookingFlow, event: FlowEvent) -> ExitCode {
    match event {
        FlowEvent::Navigate(Navigation::Confirmation) => {
            if let Some(summary) = flow.wizard().booked().and_then(booking_summary) {
                println!("{}", summary);
            }
            if let Submission::Succeeded(confirmation) = flow.wizard().submission() {
                if let Some(id) = confirmation.appointment_id {
                    println!("Appointment #{}", id);
                }
                if let Some(message) = &confirmation.message {
                    println!("{}", message);
                }
            }
            ExitCode::SUCCESS
        }
        FlowEvent::Navigate(Navigation::Login) => {
            println!("Your booking is kept. Sign in to confirm it: salon-client login <email> <password>");
            ExitCode::SUCCESS
        }
        FlowEvent::Navigate(Navigation::Exit) => ExitCode::SUCCESS,
        FlowEvent::SubmissionFailed(message) => {
            eprintln!("Booking failed: {}", message);
            ExitCode::FAILURE
        }
    }
}

async fn my_appointments(
    state: &AppState,
    filter: AppointmentFilter,
) -> Result<ExitCode, SalonError> {
    if !allowed(state, Route::MyAppointments)? {
        return Ok(ExitCode::FAILURE);
    }

    let mut list = state.my_appointments();
    list.set_filter(filter);
    list.load().await;
    if let Some(reason) = list.appointments().error() {
        eprintln!("Appointments could not be loaded: {}", reason);
        return Ok(ExitCode::FAILURE);
    }

    let visible = list.visible();
    if visible.is_empty() {
        println!("No appointment.");
    }
    for appointment in visible {
        let time = appointment
            .start_time
            .map(|t| t.to_string())
            .unwrap_or_default();
        println!(
            "#{:<5} {} {:<5}  {:<25} {:<20} [{}]{}",
            appointment.id,
            appointment.appointment_date,
            time,
            appointment.service_name.as_deref().unwrap_or("-"),
            appointment.employee_name.as_deref().unwrap_or("-"),
            appointment.status.as_str(),
            if can_cancel(appointment) { "  cancellable" } else { "" }
        );
    }
    Ok(ExitCode::SUCCESS)
}

async fn cancel(state: &AppState, appointment_id: u32) -> Result<ExitCode, SalonError> {
    if !allowed(state, Route::MyAppointments)? {
        return Ok(ExitCode::FAILURE);
    }

    let mut list = state.my_appointments();
    list.load().await;
    log_result(
        list.cancel(appointment_id).await,
        "Appointment cancelled",
        "Cancellation failed",
    )?;
    println!("Appointment #{} cancelled.", appointment_id);
    Ok(ExitCode::SUCCESS)
}

fn sidebar(state: &AppState, action: Option<SidebarAction>) -> Result<ExitCode, SalonError> {
    if !allowed(state, Route::Admin(AdminSection::Dashboard))? {
        return Ok(ExitCode::FAILURE);
    }

    let preferences = state.preferences();
    let open = match action {
        None => preferences.sidebar_open(),
        Some(SidebarAction::Open) => {
            preferences.set_sidebar_open(true)?;
            true
        }
        Some(SidebarAction::Closed) => {
            preferences.set_sidebar_open(false)?;
            false
        }
        Some(SidebarAction::Toggle) => preferences.toggle_sidebar()?,
    };
    println!("Sidebar {}", if open { "open" } else { "closed" });
    Ok(ExitCode::SUCCESS)
}
