// --- File: crates/salon_booking/src/clock.rs ---
//! Wall clock in the salon's time zone.
//!
//! Dates shown to the client ("tomorrow", "upcoming") are salon-local, so the
//! clock is a seam that tests pin with [`FixedClock`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

pub trait Clock: Send + Sync {
    /// Current local date and time at the salon.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parses an IANA zone name, falling back to `Europe/Paris`.
    pub fn from_name(name: &str) -> Self {
        let tz = name.parse::<Tz>().unwrap_or_else(|_| {
            warn!("Unknown time zone '{}', using Europe/Paris", name);
            chrono_tz::Europe::Paris
        });
        Self::new(tz)
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Paris)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Noon on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN + chrono::Duration::hours(12)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
