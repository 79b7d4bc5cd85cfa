// --- File: crates/salon_booking/src/calendar.rs ---
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

use crate::error::WizardError;
use crate::wizard::Loadable;

/// The dates a booking may fall on: `[tomorrow, tomorrow + horizon]`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn starting_after(today: NaiveDate, horizon_days: i64) -> Self {
        let start = today + Duration::days(1);
        let end = start + Duration::days(horizon_days.max(0));
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date of the window, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take_while({
            let end = self.end;
            move |date| *date <= end
        })
    }
}

/// Decides whether `date` can be picked given the available-day fetch state.
///
/// A failed or empty day set does not restrict anything beyond the window.
pub fn check_date(
    window: &DateWindow,
    days: &Loadable<BTreeSet<NaiveDate>>,
    date: NaiveDate,
) -> Result<(), WizardError> {
    if !window.contains(date) {
        return Err(WizardError::DateOutsideWindow(date));
    }
    match days {
        Loadable::Loading => Err(WizardError::DaysLoading),
        Loadable::Loaded(set) if !set.is_empty() && !set.contains(&date) => {
            Err(WizardError::DateUnavailable(date))
        }
        _ => Ok(()),
    }
}
