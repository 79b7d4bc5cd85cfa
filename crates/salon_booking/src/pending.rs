// --- File: crates/salon_booking/src/pending.rs ---
//! Draft persistence across an authentication detour.
//!
//! An anonymous confirmation stores the draft together with display copies of
//! the chosen service and roster entry; the next wizard mount with a session
//! reads it back exactly once.

use salon_common::models::Service;
use salon_common::storage::keys;
use salon_common::{KeyValueStore, SalonError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::draft::{BookingDraft, RosterOption};
use crate::guard::Route;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingBooking {
    pub booking_data: BookingDraft,
    pub selected_service: Service,
    pub selected_employee: RosterOption,
}

#[derive(Clone)]
pub struct PendingBookingStore {
    store: Arc<dyn KeyValueStore>,
}

impl PendingBookingStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stores `pending`, replacing any earlier record.
    pub fn save(&self, pending: &PendingBooking) -> Result<(), SalonError> {
        let serialized = serde_json::to_string(pending)?;
        self.store.set(keys::PENDING_BOOKING, &serialized)?;
        debug!(
            "Saved pending booking for service {}",
            pending.selected_service.id
        );
        Ok(())
    }

    pub fn exists(&self) -> bool {
        matches!(self.store.get(keys::PENDING_BOOKING), Ok(Some(_)))
    }

    /// Reads and removes the pending record.
    ///
    /// Unreadable, unparseable or incomplete records are discarded and reported as absent.
    pub fn load_and_clear(&self) -> Option<PendingBooking> {
        let raw = match self.store.take(keys::PENDING_BOOKING) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("Could not read the pending booking: {}", err);
                return None;
            }
        };
        let pending: PendingBooking = match serde_json::from_str(&raw) {
            Ok(pending) => pending,
            Err(err) => {
                warn!("Discarding corrupt pending booking: {}", err);
                return None;
            }
        };
        if let Err(err) = pending.booking_data.complete() {
            warn!("Discarding incomplete pending booking: {}", err);
            return None;
        }
        Some(pending)
    }

    pub fn set_return_destination(&self, route: &Route) -> Result<(), SalonError> {
        self.store.set(keys::REDIRECT_AFTER_LOGIN, &route.path())
    }

    /// Consumes the post-login destination marker.
    pub fn take_return_destination(&self) -> Option<Route> {
        match self.store.take(keys::REDIRECT_AFTER_LOGIN) {
            Ok(path) => path.and_then(|path| Route::from_path(&path)),
            Err(err) => {
                warn!("Could not read the post-login destination: {}", err);
                None
            }
        }
    }

    /// Where to go once a login or registration succeeded.
    ///
    /// A pending draft wins over the marker, which is consumed either way.
    pub fn post_login_destination(&self) -> Route {
        let marker = self.take_return_destination();
        if self.exists() {
            return Route::Booking;
        }
        marker.unwrap_or(Route::Home)
    }
}
