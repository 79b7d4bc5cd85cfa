// --- File: crates/salon_api/src/gateways.rs ---
//! Gateway trait implementations for [`ApiClient`].

use chrono::NaiveDate;
use reqwest::Method;
use salon_common::models::{
    Appointment, AppointmentStatus, AuthResponse, AvailableDaysResponse, AvailableSlotsResponse,
    BookingConfirmation, CreateAppointmentRequest, Employee, EmployeeSelection, LoginRequest,
    RegisterRequest, Service, SlotTime, UserProfile,
};
use salon_common::{
    AppointmentGateway, AvailabilityGateway, BoxFuture, IdentityGateway, SalonError,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::client::ApiClient;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads what the client needs from the creation response.
///
/// The backend answers `{"message": ..., "appointment": {...}}`; only the id and
/// message are kept, and a body of any other shape still counts as success.
pub(crate) fn parse_confirmation(body: &str) -> BookingConfirmation {
    let value: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let appointment_id = value
        .get("appointment")
        .and_then(|appointment| appointment.get("id"))
        .or_else(|| value.get("id"))
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok());
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);
    BookingConfirmation {
        appointment_id,
        message,
    }
}

impl AvailabilityGateway for ApiClient {
    fn services(&self) -> BoxFuture<'_, Vec<Service>, SalonError> {
        Box::pin(async move {
            let services: Vec<Service> =
                self.send_json(self.request(Method::GET, "/services")).await?;
            debug!("Fetched {} services", services.len());
            Ok(services)
        })
    }

    fn employees_by_service(&self, service_id: u32) -> BoxFuture<'_, Vec<Employee>, SalonError> {
        Box::pin(async move {
            let path = format!("/employees/by-service/{}", service_id);
            let employees: Vec<Employee> =
                self.send_json(self.request(Method::GET, &path)).await?;
            debug!("Service {} has {} employees", service_id, employees.len());
            Ok(employees)
        })
    }

    fn available_days(
        &self,
        service_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxFuture<'_, Vec<NaiveDate>, SalonError> {
        Box::pin(async move {
            let builder = self
                .request(Method::GET, "/appointments/availability-by-service")
                .query(&[
                    ("service_id", service_id.to_string()),
                    ("start_date", start.format(DATE_FORMAT).to_string()),
                    ("end_date", end.format(DATE_FORMAT).to_string()),
                ]);
            let response: AvailableDaysResponse = self.send_json(builder).await?;
            Ok(response.available_days)
        })
    }

    fn available_slots(
        &self,
        service_id: u32,
        employee: EmployeeSelection,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<SlotTime>, SalonError> {
        Box::pin(async move {
            let builder = self
                .request(Method::GET, "/appointments/availability")
                .query(&[
                    ("service_id", service_id.to_string()),
                    ("employee_id", employee.request_id().to_string()),
                    ("date", date.format(DATE_FORMAT).to_string()),
                ]);
            let response: AvailableSlotsResponse = self.send_json(builder).await?;
            Ok(response.slots)
        })
    }
}

impl AppointmentGateway for ApiClient {
    fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> BoxFuture<'_, BookingConfirmation, SalonError> {
        Box::pin(async move {
            info!(
                "Creating appointment for service {} at {}",
                request.service_id, request.appointment_date
            );
            let body = self
                .send(self.request(Method::POST, "/appointments").json(&request))
                .await?;
            Ok(parse_confirmation(&body))
        })
    }

    fn my_appointments(
        &self,
        status: Option<AppointmentStatus>,
    ) -> BoxFuture<'_, Vec<Appointment>, SalonError> {
        Box::pin(async move {
            let mut builder = self.request(Method::GET, "/appointments/my");
            if let Some(status) = status {
                builder = builder.query(&[("status", status.as_str())]);
            }
            let appointments: Vec<Appointment> = self.send_json(builder).await?;
            Ok(appointments)
        })
    }

    fn cancel_appointment(&self, appointment_id: u32) -> BoxFuture<'_, (), SalonError> {
        Box::pin(async move {
            let path = format!("/appointments/{}/cancel", appointment_id);
            self.send(self.request(Method::POST, &path)).await?;
            info!("Cancelled appointment {}", appointment_id);
            Ok(())
        })
    }
}

impl IdentityGateway for ApiClient {
    fn login(&self, request: LoginRequest) -> BoxFuture<'_, AuthResponse, SalonError> {
        Box::pin(async move {
            let builder = self.request(Method::POST, "/auth/login").json(&request);
            let response: AuthResponse = self.send_json(builder).await?;
            info!("Signed in as {}", response.user.email);
            Ok(response)
        })
    }

    fn register(&self, request: RegisterRequest) -> BoxFuture<'_, AuthResponse, SalonError> {
        Box::pin(async move {
            let builder = self.request(Method::POST, "/auth/register").json(&request);
            let response: AuthResponse = self.send_json(builder).await?;
            info!("Registered {}", response.user.email);
            Ok(response)
        })
    }

    fn current_user(&self) -> BoxFuture<'_, UserProfile, SalonError> {
        Box::pin(async move {
            let profile: UserProfile = self.send_json(self.request(Method::GET, "/auth/me")).await?;
            Ok(profile)
        })
    }
}
