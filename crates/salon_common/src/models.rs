// --- File: crates/salon_common/src/models.rs ---

// Data structures exchanged with the salon REST API, plus the small value
// types (slot times, employee selection) the booking flow is built from.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Employee id the backend interprets as "any qualified employee".
pub const NO_PREFERENCE_EMPLOYEE_ID: u32 = 0;

// --- Catalog ---

/// A bookable salon service (haircut, colouring, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Duration in minutes.
    pub duration: u32,
    /// Price in euros.
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Service {
    /// Whether the service can be offered in the booking flow at all.
    pub fn is_bookable(&self) -> bool {
        self.is_active && self.duration > 0 && self.price >= 0.0
    }
}

fn default_active() -> bool {
    true
}

/// A professional as returned by the roster endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u32,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub specialties: Option<String>,
    #[serde(default)]
    pub years_experience: Option<u32>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Employee {
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Who should perform the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "employee_id", rename_all = "snake_case")]
pub enum EmployeeSelection {
    /// Let the salon assign any qualified employee.
    NoPreference,
    Specific(u32),
}

impl EmployeeSelection {
    /// The id to put on the wire. "No preference" becomes the backend's sentinel.
    pub fn request_id(self) -> u32 {
        match self {
            EmployeeSelection::NoPreference => NO_PREFERENCE_EMPLOYEE_ID,
            EmployeeSelection::Specific(id) => id,
        }
    }
}

impl fmt::Display for EmployeeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeSelection::NoPreference => write!(f, "any"),
            EmployeeSelection::Specific(id) => write!(f, "{}", id),
        }
    }
}

// --- Slot times ---

/// A start time on the salon's wall clock, exchanged as `HH:mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for SlotTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .map(Self)
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Combines a date and a slot into the `YYYY-MM-DDTHH:mm` form the backend
/// expects in `appointment_date`.
pub fn appointment_timestamp(date: NaiveDate, time: SlotTime) -> String {
    format!("{}T{}", date.format("%Y-%m-%d"), time)
}

// --- Availability responses ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableDaysResponse {
    #[serde(default)]
    pub available_days: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    // The "no working hours that day" branch of the backend answers with
    // `available_slots` instead of `slots`.
    #[serde(default, alias = "available_slots")]
    pub slots: Vec<SlotTime>,
}

// --- Identity ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of a successful login or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub access_token: String,
    pub user: UserProfile,
}

// --- Appointments ---

/// Body of `POST /appointments`.
///
/// `date` and `time` are sent alongside the combined `appointment_date` the
/// server resolves into a single timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAppointmentRequest {
    pub service_id: u32,
    pub employee_id: u32,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub appointment_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// What the client keeps from a successful creation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingConfirmation {
    pub appointment_id: Option<u32>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Unknown => "unknown",
        }
    }

    /// Cancelled and completed appointments are final.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Cancelled | AppointmentStatus::Completed
        )
    }
}

/// An appointment as listed by `GET /appointments/my`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u32,
    #[serde(default)]
    pub service_id: Option<u32>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub service_duration: Option<u32>,
    #[serde(default)]
    pub service_price: Option<f64>,
    #[serde(default)]
    pub employee_id: Option<u32>,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub appointment_date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<SlotTime>,
    #[serde(default)]
    pub end_time: Option<SlotTime>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}
