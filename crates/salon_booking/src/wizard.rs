// --- File: crates/salon_booking/src/wizard.rs ---
//! The four-step booking wizard.
//!
//! [`BookingWizard`] is a synchronous state machine. Operations that need data
//! from the backend return [`FetchRequest`]s instead of performing I/O; the
//! caller runs them and hands each result back through [`BookingWizard::apply`].
//!
//! Every request carries a [`Ticket`] holding the generation of its channel at
//! issue time. Issuing a newer request on the same channel bumps the
//! generation, so a late answer for an earlier selection is dropped instead of
//! overwriting the data of the current one.

use chrono::NaiveDate;
use salon_common::models::{
    BookingConfirmation, CreateAppointmentRequest, Employee, EmployeeSelection, Service, SlotTime,
};
use salon_common::SalonError;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::calendar::{check_date, DateWindow};
use crate::draft::{BookingDraft, RosterOption};
use crate::error::WizardError;
use crate::pending::PendingBooking;
use crate::session::Session;

/// Shown when a failed submission carries no explanation from the backend.
pub const GENERIC_BOOKING_FAILURE: &str = "The booking could not be completed, please try again";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    SelectService,
    SelectEmployee,
    SelectDateTime,
    Confirm,
    /// Reached after a successful submission.
    Completed,
}

impl Step {
    pub fn index(self) -> usize {
        match self {
            Step::SelectService => 0,
            Step::SelectEmployee => 1,
            Step::SelectDateTime => 2,
            Step::Confirm => 3,
            Step::Completed => 4,
        }
    }

    fn previous(self) -> Option<Step> {
        match self {
            Step::SelectService | Step::Completed => None,
            Step::SelectEmployee => Some(Step::SelectService),
            Step::SelectDateTime => Some(Step::SelectEmployee),
            Step::Confirm => Some(Step::SelectDateTime),
        }
    }
}

/// State of one region fed by a backend fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    NotRequested,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Catalog,
    Roster,
    Days,
    Slots,
}

impl Channel {
    fn slot(self) -> usize {
        match self {
            Channel::Catalog => 0,
            Channel::Roster => 1,
            Channel::Days => 2,
            Channel::Slots => 3,
        }
    }
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub channel: Channel,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Catalog {
        ticket: Ticket,
    },
    Roster {
        ticket: Ticket,
        service_id: u32,
    },
    Days {
        ticket: Ticket,
        service_id: u32,
        window: DateWindow,
    },
    Slots {
        ticket: Ticket,
        service_id: u32,
        employee: EmployeeSelection,
        date: NaiveDate,
    },
}

impl FetchRequest {
    pub fn ticket(&self) -> Ticket {
        match self {
            FetchRequest::Catalog { ticket }
            | FetchRequest::Roster { ticket, .. }
            | FetchRequest::Days { ticket, .. }
            | FetchRequest::Slots { ticket, .. } => *ticket,
        }
    }
}

/// Result of a [`FetchRequest`], as returned by the gateways.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Catalog(Result<Vec<Service>, SalonError>),
    Roster(Result<Vec<Employee>, SalonError>),
    Days(Result<Vec<NaiveDate>, SalonError>),
    Slots(Result<Vec<SlotTime>, SalonError>),
}

impl FetchOutcome {
    fn channel(&self) -> Channel {
        match self {
            FetchOutcome::Catalog(_) => Channel::Catalog,
            FetchOutcome::Roster(_) => Channel::Roster,
            FetchOutcome::Days(_) => Channel::Days,
            FetchOutcome::Slots(_) => Channel::Slots,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Submission {
    #[default]
    Idle,
    InFlight,
    Failed(String),
    Succeeded(BookingConfirmation),
}

/// What an accepted confirmation asks the caller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// Send this create request; report the result through `apply_submission`.
    Submit(CreateAppointmentRequest),
    /// Persist this record and send the client to the login page.
    RedirectToLogin(PendingBooking),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Moved(Step),
    Exit,
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: Step,
    window: DateWindow,
    no_preference_label: String,
    draft: BookingDraft,
    service: Option<Service>,
    employee: Option<RosterOption>,
    catalog: Loadable<Vec<Service>>,
    roster: Loadable<Vec<RosterOption>>,
    days: Loadable<BTreeSet<NaiveDate>>,
    slots: Loadable<Vec<SlotTime>>,
    generations: [u64; 4],
    submission: Submission,
    booked: Option<PendingBooking>,
}

impl BookingWizard {
    pub fn new(window: DateWindow, no_preference_label: impl Into<String>) -> Self {
        Self {
            step: Step::SelectService,
            window,
            no_preference_label: no_preference_label.into(),
            draft: BookingDraft::default(),
            service: None,
            employee: None,
            catalog: Loadable::NotRequested,
            roster: Loadable::NotRequested,
            days: Loadable::NotRequested,
            slots: Loadable::NotRequested,
            generations: [0; 4],
            submission: Submission::Idle,
            booked: None,
        }
    }

    // --- Accessors ---

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub fn employee(&self) -> Option<&RosterOption> {
        self.employee.as_ref()
    }

    pub fn catalog(&self) -> &Loadable<Vec<Service>> {
        &self.catalog
    }

    pub fn roster(&self) -> &Loadable<Vec<RosterOption>> {
        &self.roster
    }

    pub fn days(&self) -> &Loadable<BTreeSet<NaiveDate>> {
        &self.days
    }

    pub fn slots(&self) -> &Loadable<Vec<SlotTime>> {
        &self.slots
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    /// What the last successful submission booked, kept after the draft is discarded.
    pub fn booked(&self) -> Option<&PendingBooking> {
        self.booked.as_ref()
    }

    pub fn generation(&self, channel: Channel) -> u64 {
        self.generations[channel.slot()]
    }

    /// The calendar only accepts input once the available-day fetch settled.
    pub fn is_calendar_interactive(&self) -> bool {
        !self.days.is_loading()
    }

    /// Dates the calendar currently lets the client pick.
    pub fn selectable_dates(&self) -> Vec<NaiveDate> {
        self.window
            .dates()
            .filter(|date| check_date(&self.window, &self.days, *date).is_ok())
            .collect()
    }

    // --- Transitions ---

    /// Starts loading the service catalog.
    pub fn load_catalog(&mut self) -> FetchRequest {
        self.catalog = Loadable::Loading;
        FetchRequest::Catalog {
            ticket: self.issue(Channel::Catalog),
        }
    }

    pub fn select_service(&mut self, service_id: u32) -> Result<Vec<FetchRequest>, WizardError> {
        self.expect_step(Step::SelectService, "select_service")?;
        let service = self
            .catalog
            .loaded()
            .and_then(|services| services.iter().find(|s| s.id == service_id))
            .filter(|service| service.is_bookable())
            .cloned()
            .ok_or(WizardError::UnknownService(service_id))?;

        if self.draft.service_id == Some(service_id) {
            debug!("Service {} reselected, refreshing its availability", service_id);
        } else {
            self.draft.employee = None;
            self.draft.date = None;
            self.draft.time = None;
            self.employee = None;
            self.reset_slots();
        }

        info!("Selected service {} ({})", service.id, service.name);
        self.draft.service_id = Some(service_id);
        self.service = Some(service);
        self.step = Step::SelectEmployee;
        Ok(self.request_service_data(service_id))
    }

    pub fn select_employee(
        &mut self,
        selection: EmployeeSelection,
    ) -> Result<Vec<FetchRequest>, WizardError> {
        self.expect_step(Step::SelectEmployee, "select_employee")?;
        let option = self
            .roster
            .loaded()
            .and_then(|roster| roster.iter().find(|o| o.selection == selection))
            .cloned()
            .ok_or(WizardError::UnknownEmployee(selection))?;

        info!("Selected employee {}", selection);
        self.draft.employee = Some(selection);
        self.draft.time = None;
        self.employee = Some(option);
        self.step = Step::SelectDateTime;

        match self.draft.date {
            Some(date) => Ok(vec![self.request_slots(date)?]),
            None => {
                self.reset_slots();
                Ok(Vec::new())
            }
        }
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<Vec<FetchRequest>, WizardError> {
        self.expect_step(Step::SelectDateTime, "select_date")?;
        check_date(&self.window, &self.days, date)?;

        debug!("Selected date {}", date);
        self.draft.date = Some(date);
        self.draft.time = None;
        Ok(vec![self.request_slots(date)?])
    }

    pub fn select_time(&mut self, time: SlotTime) -> Result<(), WizardError> {
        self.expect_step(Step::SelectDateTime, "select_time")?;
        let offered = self
            .slots
            .loaded()
            .is_some_and(|slots| slots.contains(&time));
        if !offered {
            return Err(WizardError::UnavailableSlot(time));
        }

        info!("Selected slot {}", time);
        self.draft.time = Some(time);
        self.step = Step::Confirm;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<(), WizardError> {
        self.expect_step(Step::Confirm, "set_notes")?;
        self.draft.notes = notes.into();
        Ok(())
    }

    /// One step back, keeping every choice made so far.
    pub fn back(&mut self) -> BackOutcome {
        match self.step.previous() {
            Some(step) => {
                self.step = step;
                BackOutcome::Moved(step)
            }
            None => BackOutcome::Exit,
        }
    }

    pub fn confirm(&mut self, session: Option<&Session>) -> Result<ConfirmOutcome, WizardError> {
        self.expect_step(Step::Confirm, "confirm")?;
        if self.submission == Submission::InFlight {
            return Err(WizardError::SubmissionInFlight);
        }
        let complete = self.draft.complete()?;

        if session.is_none() {
            info!("Anonymous confirmation, keeping the draft for after login");
            return Ok(ConfirmOutcome::RedirectToLogin(self.pending_booking()?));
        }

        self.submission = Submission::InFlight;
        Ok(ConfirmOutcome::Submit(complete.to_request()))
    }

    /// Records the answer to the create request issued by `confirm`.
    pub fn apply_submission(&mut self, result: Result<BookingConfirmation, SalonError>) {
        if self.submission != Submission::InFlight {
            warn!("Ignoring a submission result with no booking in flight");
            return;
        }
        match result {
            Ok(confirmation) => {
                info!("Booking confirmed: {:?}", confirmation.appointment_id);
                self.booked = self.pending_booking().ok();
                self.draft = BookingDraft::default();
                self.service = None;
                self.employee = None;
                self.step = Step::Completed;
                self.submission = Submission::Succeeded(confirmation);
            }
            Err(err) => {
                let message = err
                    .backend_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| GENERIC_BOOKING_FAILURE.to_string());
                warn!("Booking failed: {}", err);
                self.submission = Submission::Failed(message);
            }
        }
    }

    /// The record to persist across a login detour.
    pub fn pending_booking(&self) -> Result<PendingBooking, WizardError> {
        self.draft.complete()?;
        Ok(PendingBooking {
            booking_data: self.draft.clone(),
            selected_service: self
                .service
                .clone()
                .ok_or(WizardError::IncompleteDraft("service"))?,
            selected_employee: self
                .employee
                .clone()
                .ok_or(WizardError::IncompleteDraft("employee"))?,
        })
    }

    /// Hydrates a saved draft straight into `Confirm`.
    ///
    /// A draft whose date has left the bookable window is refused and leaves
    /// the wizard untouched.
    ///
    /// The returned requests reload the data behind the earlier steps so that
    /// stepping back shows them again.
    pub fn resume(&mut self, pending: PendingBooking) -> Result<Vec<FetchRequest>, WizardError> {
        let complete = pending.booking_data.complete()?;
        if !self.window.contains(complete.date) {
            return Err(WizardError::DateOutsideWindow(complete.date));
        }
        info!(
            "Resuming booking of service {} on {} at {}",
            complete.service_id, complete.date, complete.time
        );

        self.draft = pending.booking_data;
        self.service = Some(pending.selected_service);
        self.employee = Some(pending.selected_employee);
        self.submission = Submission::Idle;
        self.step = Step::Confirm;

        let mut requests = self.request_service_data(complete.service_id);
        requests.push(self.request_slots(complete.date)?);
        Ok(requests)
    }

    /// Applies a fetch result if it still matches the current selection.
    ///
    /// Returns `false` when the result was stale and dropped.
    pub fn apply(&mut self, ticket: Ticket, outcome: FetchOutcome) -> bool {
        if outcome.channel() != ticket.channel {
            warn!("Dropping {:?} result delivered on ticket {:?}", outcome.channel(), ticket);
            return false;
        }
        let current = self.generation(ticket.channel);
        if ticket.generation != current {
            debug!(
                "Dropping stale {:?} result (generation {}, current {})",
                ticket.channel, ticket.generation, current
            );
            return false;
        }

        match outcome {
            FetchOutcome::Catalog(Ok(services)) => {
                let active: Vec<Service> =
                    services.into_iter().filter(Service::is_bookable).collect();
                debug!("Catalog loaded with {} services", active.len());
                self.catalog = Loadable::Loaded(active);
            }
            FetchOutcome::Catalog(Err(err)) => {
                warn!("Failed to load services: {}", err);
                self.catalog = Loadable::Failed(err.to_string());
            }
            FetchOutcome::Roster(Ok(employees)) => {
                self.roster =
                    Loadable::Loaded(RosterOption::roster(&self.no_preference_label, &employees));
            }
            FetchOutcome::Roster(Err(err)) => {
                warn!("Failed to load employees: {}", err);
                self.roster = Loadable::Failed(err.to_string());
            }
            FetchOutcome::Days(Ok(days)) => {
                if days.is_empty() {
                    debug!("No available-day data, calendar limited to the window only");
                }
                self.days = Loadable::Loaded(days.into_iter().collect());
            }
            FetchOutcome::Days(Err(err)) => {
                warn!("Failed to load available days, calendar left open: {}", err);
                self.days = Loadable::Failed(err.to_string());
            }
            FetchOutcome::Slots(Ok(slots)) => {
                debug!("{} slots available", slots.len());
                self.slots = Loadable::Loaded(slots);
            }
            FetchOutcome::Slots(Err(err)) => {
                warn!("Failed to load slots: {}", err);
                self.slots = Loadable::Failed(err.to_string());
            }
        }
        true
    }

    // --- Internals ---

    fn expect_step(&self, expected: Step, operation: &'static str) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                operation,
                step: self.step,
            })
        }
    }

    fn issue(&mut self, channel: Channel) -> Ticket {
        let generation = &mut self.generations[channel.slot()];
        *generation += 1;
        Ticket {
            channel,
            generation: *generation,
        }
    }

    fn request_service_data(&mut self, service_id: u32) -> Vec<FetchRequest> {
        self.roster = Loadable::Loading;
        self.days = Loadable::Loading;
        vec![
            FetchRequest::Roster {
                ticket: self.issue(Channel::Roster),
                service_id,
            },
            FetchRequest::Days {
                ticket: self.issue(Channel::Days),
                service_id,
                window: self.window,
            },
        ]
    }

    fn request_slots(&mut self, date: NaiveDate) -> Result<FetchRequest, WizardError> {
        let service_id = self
            .draft
            .service_id
            .ok_or(WizardError::IncompleteDraft("service"))?;
        let employee = self
            .draft
            .employee
            .ok_or(WizardError::IncompleteDraft("employee"))?;
        self.slots = Loadable::Loading;
        Ok(FetchRequest::Slots {
            ticket: self.issue(Channel::Slots),
            service_id,
            employee,
            date,
        })
    }

    /// Forgets the slot list and invalidates any slot fetch still in flight.
    fn reset_slots(&mut self) {
        self.issue(Channel::Slots);
        self.slots = Loadable::NotRequested;
    }
}
