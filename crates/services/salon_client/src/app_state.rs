// --- File: crates/services/salon_client/src/app_state.rs ---
use std::sync::Arc;

use salon_api::ApiClient;
use salon_booking::clock::{Clock, SystemClock};
use salon_booking::{BookingFlow, FlowContext, PendingBookingStore, SessionStore};
use salon_booking::appointments::MyAppointments;
use salon_booking::preferences::Preferences;
use salon_common::{Context, CredentialHandle, FileStore, KeyValueStore, SalonError};
use salon_config::AppConfig;
use tracing::debug;

/// Everything a command needs, wired once at startup.
///
/// The API client is shared behind the three gateway traits; the session
/// store and the pending-draft store share the same durable file, so a draft
/// saved by `book` is found again by `login` or `resume`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,

    /// Durable key/value file holding the credential, profile and drafts.
    pub store: Arc<dyn KeyValueStore>,

    pub api: Arc<ApiClient>,

    pub session: Arc<SessionStore>,

    pub pending: PendingBookingStore,

    /// Wall clock in the salon's time zone.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, SalonError> {
        let config = Arc::new(config);
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage.path));
        let credentials = CredentialHandle::new();
        let api = Arc::new(
            ApiClient::new(&config.api, credentials.clone())
                .context("Failed to build the API client")?,
        );
        debug!("API client targets {}", api.base_url());

        let session = Arc::new(SessionStore::new(
            api.clone(),
            Arc::clone(&store),
            credentials,
        ));
        let pending = PendingBookingStore::new(Arc::clone(&store));
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::from_name(&config.booking.time_zone));

        Ok(Self {
            config,
            store,
            api,
            session,
            pending,
            clock,
        })
    }

    pub fn flow_context(&self) -> FlowContext {
        FlowContext {
            availability: self.api.clone(),
            appointments: self.api.clone(),
            session: Arc::clone(&self.session),
            pending: self.pending.clone(),
            clock: Arc::clone(&self.clock),
        }
    }

    pub fn booking_flow(&self) -> BookingFlow {
        BookingFlow::new(self.flow_context(), &self.config.booking)
    }

    pub fn my_appointments(&self) -> MyAppointments {
        MyAppointments::new(self.api.clone(), Arc::clone(&self.clock))
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::new(Arc::clone(&self.store))
    }
}
