// --- File: crates/salon_booking/src/session.rs ---
//! Client session store.
//!
//! Holds the signed-in identity, persists the credential under `token` and the
//! profile under `user`, and publishes every change on a `watch` channel so
//! the booking flow and the route guard always read the same state.

use salon_common::models::{LoginRequest, UserProfile};
use salon_common::storage::keys;
use salon_common::{validation_error, CredentialHandle, IdentityGateway, KeyValueStore, SalonError};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::registration::{describe, RegistrationForm};

#[derive(Clone, PartialEq)]
pub struct Session {
    pub profile: UserProfile,
    pub token: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.profile.is_admin()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("profile", &self.profile)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub identity: Option<Session>,
    pub is_loading: bool,
}

impl SessionState {
    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(Session::is_admin)
    }
}

pub struct SessionStore {
    identity: Arc<dyn IdentityGateway>,
    store: Arc<dyn KeyValueStore>,
    credentials: CredentialHandle,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Starts in the loading state until [`restore`](Self::restore) resolves.
    pub fn new(
        identity: Arc<dyn IdentityGateway>,
        store: Arc<dyn KeyValueStore>,
        credentials: CredentialHandle,
    ) -> Self {
        let (state, _) = watch::channel(SessionState {
            identity: None,
            is_loading: true,
        });
        Self {
            identity,
            store,
            credentials,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().identity.clone()
    }

    /// Re-establishes the session from the persisted credential.
    ///
    /// A credential the backend rejects is dropped. When the backend cannot be
    /// reached the cached profile is trusted.
    pub async fn restore(&self) -> Option<Session> {
        let token = match self.store.get(keys::TOKEN) {
            Ok(token) => token,
            Err(err) => {
                warn!("Could not read the stored credential: {}", err);
                None
            }
        };
        let Some(token) = token else {
            self.publish(None);
            return None;
        };

        self.credentials.set(Some(token.clone()));
        let session = match self.identity.current_user().await {
            Ok(profile) => {
                self.persist_profile(&profile);
                Some(Session { profile, token })
            }
            Err(err) if err.is_auth_error() => {
                info!("Stored credential rejected, signing out");
                self.forget();
                None
            }
            Err(err) => {
                warn!("Could not validate the stored credential: {}", err);
                self.cached_profile().map(|profile| Session { profile, token })
            }
        };
        self.publish(session.clone());
        session
    }

    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Session, SalonError> {
        let request = LoginRequest {
            email: email.into(),
            password: password.into(),
        };
        let response = self.identity.login(request).await?;
        Ok(self.establish(response.access_token, response.user))
    }

    /// Validates the form locally, then creates the account and signs in.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Session, SalonError> {
        let request = form
            .validate()
            .map_err(|errors| validation_error(describe(&errors)))?;
        let response = self.identity.register(request).await?;
        Ok(self.establish(response.access_token, response.user))
    }

    pub fn logout(&self) {
        info!("Signing out");
        self.forget();
        self.publish(None);
    }

    /// Drops a credential the backend no longer accepts.
    pub fn invalidate(&self) {
        warn!("Credential rejected by the backend, clearing the session");
        self.forget();
        self.publish(None);
    }

    fn establish(&self, token: String, profile: UserProfile) -> Session {
        if let Err(err) = self.store.set(keys::TOKEN, &token) {
            warn!("Could not persist the credential: {}", err);
        }
        self.persist_profile(&profile);
        self.credentials.set(Some(token.clone()));
        info!("Signed in as {}", profile.email);
        let session = Session { profile, token };
        self.publish(Some(session.clone()));
        session
    }

    fn persist_profile(&self, profile: &UserProfile) {
        let result = serde_json::to_string(profile)
            .map_err(SalonError::from)
            .and_then(|serialized| self.store.set(keys::USER, &serialized));
        if let Err(err) = result {
            warn!("Could not persist the user profile: {}", err);
        }
    }

    fn cached_profile(&self) -> Option<UserProfile> {
        let raw = self.store.get(keys::USER).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                debug!("Ignoring unreadable cached profile: {}", err);
                None
            }
        }
    }

    fn forget(&self) {
        self.credentials.clear();
        for key in [keys::TOKEN, keys::USER] {
            if let Err(err) = self.store.remove(key) {
                warn!("Could not remove {}: {}", key, err);
            }
        }
    }

    fn publish(&self, identity: Option<Session>) {
        self.state.send_replace(SessionState {
            identity,
            is_loading: false,
        });
    }
}
