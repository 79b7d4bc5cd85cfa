// --- File: crates/salon_common/src/credentials.rs ---
//! Shared bearer credential.
//!
//! The session store writes the credential after a successful login and clears
//! it on logout or invalidation; the API client reads it when building each
//! request. Both hold a clone of the same handle.

use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default)]
pub struct CredentialHandle {
    token: Arc<RwLock<Option<String>>>,
}

impl CredentialHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let handle = Self::new();
        handle.set(Some(token.into()));
        handle
    }

    /// Replaces the current credential. `None` clears it.
    pub fn set(&self, token: Option<String>) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = token;
    }

    pub fn clear(&self) {
        self.set(None);
    }

    /// The bearer token to attach to outgoing requests, if any.
    pub fn bearer(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_present(&self) -> bool {
        self.bearer().is_some()
    }
}
