// --- File: crates/salon_booking/src/draft.rs ---
use chrono::NaiveDate;
use salon_common::models::{
    appointment_timestamp, CreateAppointmentRequest, Employee, EmployeeSelection, SlotTime,
};
use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// The client's in-progress choices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub service_id: Option<u32>,
    pub employee: Option<EmployeeSelection>,
    pub date: Option<NaiveDate>,
    pub time: Option<SlotTime>,
    #[serde(default)]
    pub notes: String,
}

/// A draft with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteDraft {
    pub service_id: u32,
    pub employee: EmployeeSelection,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub notes: Option<String>,
}

impl BookingDraft {
    pub fn complete(&self) -> Result<CompleteDraft, WizardError> {
        Ok(CompleteDraft {
            service_id: self.service_id.ok_or(WizardError::IncompleteDraft("service"))?,
            employee: self.employee.ok_or(WizardError::IncompleteDraft("employee"))?,
            date: self.date.ok_or(WizardError::IncompleteDraft("date"))?,
            time: self.time.ok_or(WizardError::IncompleteDraft("time"))?,
            notes: Some(self.notes.trim())
                .filter(|notes| !notes.is_empty())
                .map(str::to_string),
        })
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_ok()
    }
}

impl CompleteDraft {
    /// The create-appointment body; "no preference" goes out as the backend's sentinel.
    pub fn to_request(&self) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            service_id: self.service_id,
            employee_id: self.employee.request_id(),
            date: self.date,
            time: self.time,
            appointment_date: appointment_timestamp(self.date, self.time),
            notes: self.notes.clone(),
        }
    }
}

/// One entry of the roster offered for the selected service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterOption {
    pub selection: EmployeeSelection,
    pub label: String,
    #[serde(default)]
    pub position: Option<String>,
    /// The professional behind this entry, `None` for "no preference".
    #[serde(default)]
    pub employee: Option<Employee>,
}

impl RosterOption {
    /// The synthetic "any professional" entry placed ahead of every roster.
    pub fn no_preference(label: &str) -> Self {
        Self {
            selection: EmployeeSelection::NoPreference,
            label: label.to_string(),
            position: Some("Next available slot".to_string()),
            employee: None,
        }
    }

    /// `[no preference, employees...]`
    pub fn roster(no_preference_label: &str, employees: &[Employee]) -> Vec<Self> {
        std::iter::once(Self::no_preference(no_preference_label))
            .chain(employees.iter().map(Self::from))
            .collect()
    }
}

impl From<&Employee> for RosterOption {
    fn from(employee: &Employee) -> Self {
        Self {
            selection: EmployeeSelection::Specific(employee.id),
            label: employee.display_name(),
            position: employee.position.clone(),
            employee: Some(employee.clone()),
        }
    }
}
