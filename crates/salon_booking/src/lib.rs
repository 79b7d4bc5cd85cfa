// --- File: crates/salon_booking/src/lib.rs ---
// Declare modules within this crate
pub mod appointments;
pub mod calendar;
#[cfg(test)]
mod calendar_proptest;
pub mod clock;
pub mod draft;
pub mod error;
pub mod flow;
pub mod guard;
#[cfg(test)]
mod guard_test;
pub mod pending;
#[cfg(test)]
mod pending_test;
pub mod preferences;
pub mod registration;
pub mod session;
pub mod wizard;
#[cfg(test)]
mod wizard_test;

pub use calendar::DateWindow;
pub use clock::{Clock, FixedClock, SystemClock};
pub use draft::{BookingDraft, CompleteDraft, RosterOption};
pub use error::WizardError;
pub use flow::{BookingFlow, FlowContext, FlowEvent, Navigation};
pub use pending::{PendingBooking, PendingBookingStore};
pub use session::{Session, SessionState, SessionStore};
pub use wizard::{BookingWizard, ConfirmOutcome, FetchRequest, Loadable, Step};
