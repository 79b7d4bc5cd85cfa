// --- File: crates/salon_common/src/storage.rs ---
//! Durable client-side key/value storage.
//!
//! Everything the client persists (credential, pending booking, post-login
//! destination, UI preferences) goes through the narrow [`KeyValueStore`]
//! capability, so tests can swap the file-backed store for [`MemoryStore`].

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::error::{storage_error, SalonError};

/// Well-known keys.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const PENDING_BOOKING: &str = "pendingBooking";
    pub const REDIRECT_AFTER_LOGIN: &str = "redirectAfterLogin";
    pub const SIDEBAR_OPEN: &str = "sidebarOpen";
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SalonError>;

    fn set(&self, key: &str, value: &str) -> Result<(), SalonError>;

    fn remove(&self, key: &str) -> Result<(), SalonError>;

    /// Reads and removes a value in one step.
    fn take(&self, key: &str) -> Result<Option<String>, SalonError> {
        let value = self.get(key)?;
        if value.is_some() {
            self.remove(key)?;
        }
        Ok(value)
    }
}

/// In-process store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SalonError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SalonError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SalonError> {
        self.entries().remove(key);
        Ok(())
    }

    fn take(&self, key: &str) -> Result<Option<String>, SalonError> {
        Ok(self.entries().remove(key))
    }
}

/// Store backed by a single JSON object on disk.
///
/// Writes go to a sibling temporary file that is renamed over the original.
/// An unreadable or corrupt file is treated as empty rather than as an error.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, SalonError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!("Ignoring corrupt state file {}: {}", self.path.display(), err);
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), SalonError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(entries)
            .map_err(|err| storage_error(format!("serializing state: {}", err)))?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serialized)?;
        fs::rename(&tmp_path, &self.path)?;
        debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SalonError> {
        let _guard = self.guard();
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SalonError> {
        let _guard = self.guard();
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SalonError> {
        let _guard = self.guard();
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }

    fn take(&self, key: &str) -> Result<Option<String>, SalonError> {
        let _guard = self.guard();
        let mut entries = self.read_entries()?;
        let value = entries.remove(key);
        if value.is_some() {
            self.write_entries(&entries)?;
        }
        Ok(value)
    }
}
