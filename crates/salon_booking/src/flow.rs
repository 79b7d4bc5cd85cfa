// --- File: crates/salon_booking/src/flow.rs ---
//! Async driver around [`BookingWizard`].
//!
//! Fetches requested by the wizard run as independent tasks in a
//! [`JoinSet`]; [`BookingFlow::settle`] feeds their results back in
//! completion order. Submissions are awaited inline, so a second confirmation
//! cannot overlap the first.

use chrono::NaiveDate;
use salon_common::models::{CreateAppointmentRequest, EmployeeSelection, SlotTime};
use salon_common::{AppointmentGateway, AvailabilityGateway};
use salon_config::BookingConfig;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::calendar::DateWindow;
use crate::clock::Clock;
use crate::error::WizardError;
use crate::pending::PendingBookingStore;
use crate::session::SessionStore;
use crate::wizard::{
    BackOutcome, BookingWizard, ConfirmOutcome, FetchOutcome, FetchRequest, Submission, Ticket,
    GENERIC_BOOKING_FAILURE,
};

/// Where the client should be taken next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Login,
    /// Left the wizard from its first step.
    Exit,
    /// The booking was created.
    Confirmation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    Navigate(Navigation),
    /// The backend refused the booking; the wizard stays on `Confirm`.
    SubmissionFailed(String),
}

/// Collaborators shared by every flow instance.
#[derive(Clone)]
pub struct FlowContext {
    pub availability: Arc<dyn AvailabilityGateway>,
    pub appointments: Arc<dyn AppointmentGateway>,
    pub session: Arc<SessionStore>,
    pub pending: PendingBookingStore,
    pub clock: Arc<dyn Clock>,
}

pub struct BookingFlow {
    wizard: BookingWizard,
    context: FlowContext,
    tasks: JoinSet<(Ticket, FetchOutcome)>,
}

impl BookingFlow {
    pub fn new(context: FlowContext, config: &BookingConfig) -> Self {
        let window = DateWindow::starting_after(context.clock.today(), config.horizon_days);
        Self {
            wizard: BookingWizard::new(window, config.no_preference_label.clone()),
            context,
            tasks: JoinSet::new(),
        }
    }

    pub fn wizard(&self) -> &BookingWizard {
        &self.wizard
    }

    /// Number of fetches still running.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Loads the catalog and, when the client just came back from logging in
    /// with a saved draft, submits that draft once.
    pub async fn mount(&mut self) -> Option<FlowEvent> {
        self.load_catalog();

        // The pending record is only consumed once a session exists.
        let session = self.context.session.current()?;
        let pending = self.context.pending.load_and_clear()?;
        let requests = match self.wizard.resume(pending) {
            Ok(requests) => requests,
            Err(err) => {
                warn!("Saved draft could not be resumed: {}", err);
                return None;
            }
        };
        self.dispatch(requests);

        match self.wizard.confirm(Some(&session)) {
            Ok(ConfirmOutcome::Submit(request)) => Some(self.submit(request).await),
            Ok(ConfirmOutcome::RedirectToLogin(_)) => None,
            Err(err) => {
                warn!("Resumed draft was not submitted: {}", err);
                None
            }
        }
    }

    /// Starts loading the service catalog.
    pub fn load_catalog(&mut self) {
        let catalog = self.wizard.load_catalog();
        self.dispatch(vec![catalog]);
    }

    pub fn select_service(&mut self, service_id: u32) -> Result<(), WizardError> {
        let requests = self.wizard.select_service(service_id)?;
        self.dispatch(requests);
        Ok(())
    }

    pub fn select_employee(&mut self, selection: EmployeeSelection) -> Result<(), WizardError> {
        let requests = self.wizard.select_employee(selection)?;
        self.dispatch(requests);
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        let requests = self.wizard.select_date(date)?;
        self.dispatch(requests);
        Ok(())
    }

    pub fn select_time(&mut self, time: SlotTime) -> Result<(), WizardError> {
        self.wizard.select_time(time)
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<(), WizardError> {
        self.wizard.set_notes(notes)
    }

    pub fn back(&mut self) -> Option<Navigation> {
        match self.wizard.back() {
            BackOutcome::Moved(step) => {
                debug!("Back to {:?}", step);
                None
            }
            BackOutcome::Exit => Some(Navigation::Exit),
        }
    }

    /// Waits for every running fetch and applies the results as they arrive.
    ///
    /// Returns how many results were applied; stale ones are dropped.
    pub async fn settle(&mut self) -> usize {
        let mut applied = 0;
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok((ticket, outcome)) => {
                    if self.wizard.apply(ticket, outcome) {
                        applied += 1;
                    }
                }
                Err(err) => error!("Fetch task failed: {}", err),
            }
        }
        applied
    }

    pub async fn confirm(&mut self) -> Result<FlowEvent, WizardError> {
        let session = self.context.session.current();
        match self.wizard.confirm(session.as_ref())? {
            ConfirmOutcome::Submit(request) => Ok(self.submit(request).await),
            ConfirmOutcome::RedirectToLogin(pending) => {
                if let Err(err) = self.context.pending.save(&pending) {
                    error!("Could not keep the draft for after login: {}", err);
                }
                Ok(FlowEvent::Navigate(Navigation::Login))
            }
        }
    }

    async fn submit(&mut self, request: CreateAppointmentRequest) -> FlowEvent {
        let result = self.context.appointments.create_appointment(request).await;
        let rejected_credential = matches!(&result, Err(err) if err.is_auth_error());
        self.wizard.apply_submission(result);

        if rejected_credential {
            self.context.session.invalidate();
            match self.wizard.pending_booking() {
                Ok(pending) => {
                    if let Err(err) = self.context.pending.save(&pending) {
                        error!("Could not keep the draft for after login: {}", err);
                    }
                }
                Err(err) => warn!("Nothing to keep for after login: {}", err),
            }
            return FlowEvent::Navigate(Navigation::Login);
        }

        match self.wizard.submission() {
            Submission::Succeeded(_) => {
                info!("Booking submitted");
                FlowEvent::Navigate(Navigation::Confirmation)
            }
            Submission::Failed(message) => FlowEvent::SubmissionFailed(message.clone()),
            other => {
                error!("Unexpected submission state after submit: {:?}", other);
                FlowEvent::SubmissionFailed(GENERIC_BOOKING_FAILURE.to_string())
            }
        }
    }

    fn dispatch(&mut self, requests: Vec<FetchRequest>) {
        for request in requests {
            let ticket = request.ticket();
            let availability = Arc::clone(&self.context.availability);
            debug!("Fetching {:?}", request);
            self.tasks.spawn(async move {
                let outcome = match request {
                    FetchRequest::Catalog { .. } => {
                        FetchOutcome::Catalog(availability.services().await)
                    }
                    FetchRequest::Roster { service_id, .. } => {
                        FetchOutcome::Roster(availability.employees_by_service(service_id).await)
                    }
                    FetchRequest::Days {
                        service_id, window, ..
                    } => FetchOutcome::Days(
                        availability
                            .available_days(service_id, window.start, window.end)
                            .await,
                    ),
                    FetchRequest::Slots {
                        service_id,
                        employee,
                        date,
                        ..
                    } => FetchOutcome::Slots(
                        availability
                            .available_slots(service_id, employee, date)
                            .await,
                    ),
                };
                (ticket, outcome)
            });
        }
    }
}
