// --- File: crates/salon_common/src/services.rs ---
//! Gateway abstractions for the salon REST API.
//!
//! This module provides trait definitions for the remote collaborators the
//! booking client depends on. These traits allow for dependency injection and
//! easier testing by decoupling the client logic from the HTTP implementation.

use chrono::NaiveDate;
use std::future::Future;
use std::pin::Pin;

use crate::error::SalonError;
use crate::models::{
    Appointment, AppointmentStatus, AuthResponse, BookingConfirmation, CreateAppointmentRequest,
    Employee, EmployeeSelection, LoginRequest, RegisterRequest, Service, SlotTime, UserProfile,
};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Read-only availability data owned by the backend.
pub trait AvailabilityGateway: Send + Sync {
    /// The active service catalog.
    fn services(&self) -> BoxFuture<'_, Vec<Service>, SalonError>;

    /// Employees able to perform the given service.
    fn employees_by_service(&self, service_id: u32) -> BoxFuture<'_, Vec<Employee>, SalonError>;

    /// Dates in `[start, end]` on which at least one slot may exist for the service.
    fn available_days(
        &self,
        service_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxFuture<'_, Vec<NaiveDate>, SalonError>;

    /// Ordered start times for (service, employee-or-any, date).
    fn available_slots(
        &self,
        service_id: u32,
        employee: EmployeeSelection,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<SlotTime>, SalonError>;
}

/// Appointment operations performed on behalf of the signed-in client.
pub trait AppointmentGateway: Send + Sync {
    /// Create an appointment from a completed booking draft.
    fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> BoxFuture<'_, BookingConfirmation, SalonError>;

    /// The client's own appointments, optionally filtered by status.
    fn my_appointments(
        &self,
        status: Option<AppointmentStatus>,
    ) -> BoxFuture<'_, Vec<Appointment>, SalonError>;

    /// Cancel one of the client's own appointments.
    fn cancel_appointment(&self, appointment_id: u32) -> BoxFuture<'_, (), SalonError>;
}

/// Credential issuance and profile lookup.
pub trait IdentityGateway: Send + Sync {
    fn login(&self, request: LoginRequest) -> BoxFuture<'_, AuthResponse, SalonError>;

    fn register(&self, request: RegisterRequest) -> BoxFuture<'_, AuthResponse, SalonError>;

    /// The profile behind the credential currently attached to requests.
    fn current_user(&self) -> BoxFuture<'_, UserProfile, SalonError>;
}
