// --- File: crates/salon_booking/src/preferences.rs ---
use salon_common::storage::keys;
use salon_common::{KeyValueStore, SalonError};
use std::sync::Arc;
use tracing::debug;

/// Persisted UI preferences.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Whether the admin sidebar is expanded. Defaults to open.
    pub fn sidebar_open(&self) -> bool {
        self.store
            .get(keys::SIDEBAR_OPEN)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<bool>(&raw).ok())
            .unwrap_or(true)
    }

    pub fn set_sidebar_open(&self, open: bool) -> Result<(), SalonError> {
        debug!("Sidebar open: {}", open);
        self.store.set(keys::SIDEBAR_OPEN, &open.to_string())
    }

    pub fn toggle_sidebar(&self) -> Result<bool, SalonError> {
        let open = !self.sidebar_open();
        self.set_sidebar_open(open)?;
        Ok(open)
    }
}
