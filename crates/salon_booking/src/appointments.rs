// --- File: crates/salon_booking/src/appointments.rs ---
//! The client's own appointments: listing, filtering and cancellation.

use chrono::{NaiveDateTime, NaiveTime};
use salon_common::models::{Appointment, AppointmentStatus};
use salon_common::{validation_error, not_found, AppointmentGateway, SalonError};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::wizard::Loadable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppointmentFilter {
    #[default]
    All,
    Upcoming,
    Past,
}

impl FromStr for AppointmentFilter {
    type Err = SalonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(AppointmentFilter::All),
            "upcoming" => Ok(AppointmentFilter::Upcoming),
            "past" => Ok(AppointmentFilter::Past),
            other => Err(validation_error(format!("unknown filter '{}'", other))),
        }
    }
}

/// When the appointment starts, in salon-local time.
pub fn starts_at(appointment: &Appointment) -> NaiveDateTime {
    let time = appointment
        .start_time
        .map(|slot| slot.time())
        .unwrap_or(NaiveTime::MIN);
    appointment.appointment_date.and_time(time)
}

pub fn is_upcoming(appointment: &Appointment, now: NaiveDateTime) -> bool {
    starts_at(appointment) >= now && !appointment.status.is_closed()
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment, now: NaiveDateTime) -> bool {
        match self {
            AppointmentFilter::All => true,
            AppointmentFilter::Upcoming => is_upcoming(appointment, now),
            AppointmentFilter::Past => !is_upcoming(appointment, now),
        }
    }
}

/// Only appointments still awaiting service can be cancelled.
pub fn can_cancel(appointment: &Appointment) -> bool {
    matches!(
        appointment.status,
        AppointmentStatus::Pending | AppointmentStatus::Confirmed
    )
}

pub struct MyAppointments {
    gateway: Arc<dyn AppointmentGateway>,
    clock: Arc<dyn Clock>,
    appointments: Loadable<Vec<Appointment>>,
    filter: AppointmentFilter,
}

impl MyAppointments {
    pub fn new(gateway: Arc<dyn AppointmentGateway>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gateway,
            clock,
            appointments: Loadable::NotRequested,
            filter: AppointmentFilter::All,
        }
    }

    pub fn appointments(&self) -> &Loadable<Vec<Appointment>> {
        &self.appointments
    }

    pub fn filter(&self) -> AppointmentFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: AppointmentFilter) {
        self.filter = filter;
    }

    /// Fetches the list. A failure is kept as the list state rather than returned.
    pub async fn load(&mut self) {
        self.appointments = Loadable::Loading;
        self.appointments = match self.gateway.my_appointments(None).await {
            Ok(appointments) => Loadable::Loaded(appointments),
            Err(err) => {
                warn!("Failed to load appointments: {}", err);
                Loadable::Failed(err.to_string())
            }
        };
    }

    /// Appointments matching the current filter, in backend order.
    pub fn visible(&self) -> Vec<&Appointment> {
        let now = self.clock.now();
        self.appointments
            .loaded()
            .map(|appointments| {
                appointments
                    .iter()
                    .filter(|appointment| self.filter.matches(appointment, now))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cancels one appointment and reloads the list.
    pub async fn cancel(&mut self, appointment_id: u32) -> Result<(), SalonError> {
        let appointment = self
            .appointments
            .loaded()
            .and_then(|list| list.iter().find(|a| a.id == appointment_id))
            .ok_or_else(|| not_found(format!("appointment {}", appointment_id)))?;
        if !can_cancel(appointment) {
            return Err(validation_error(format!(
                "appointment {} is {} and can no longer be cancelled",
                appointment_id,
                appointment.status.as_str()
            )));
        }

        self.gateway.cancel_appointment(appointment_id).await?;
        info!("Appointment {} cancelled", appointment_id);
        self.load().await;
        Ok(())
    }
}
