// --- File: crates/salon_booking/src/error.rs ---
use chrono::NaiveDate;
use salon_common::models::{EmployeeSelection, SlotTime};
use salon_common::SalonError;
use thiserror::Error;

use crate::wizard::Step;

/// Wizard operations refused because of the current state or selection.
///
/// None of these reach the backend; the wizard state is left unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("{operation} is not available in step {step:?}")]
    WrongStep { operation: &'static str, step: Step },

    #[error("Service {0} is not in the catalog")]
    UnknownService(u32),

    #[error("Employee {0} does not perform the selected service")]
    UnknownEmployee(EmployeeSelection),

    #[error("{0} is outside the bookable window")]
    DateOutsideWindow(NaiveDate),

    #[error("{0} has no availability")]
    DateUnavailable(NaiveDate),

    #[error("Available days are still loading")]
    DaysLoading,

    #[error("{0} is not an available slot")]
    UnavailableSlot(SlotTime),

    #[error("The booking is missing: {0}")]
    IncompleteDraft(&'static str),

    #[error("A booking request is already in flight")]
    SubmissionInFlight,
}

impl From<WizardError> for SalonError {
    fn from(err: WizardError) -> Self {
        SalonError::ValidationError(err.to_string())
    }
}
