//! Session manager
//!
//! Owns the authentication credential and the visible status message. The
//! credential never leaves this type except as a read-only copy handed to
//! the sync controller per request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::api::Backend;
use crate::error::AuthError;

use super::state::{Credential, SessionEpoch, SessionEvent, SessionState};

/// Owns the login session: credential, status text, and session epoch.
///
/// States move `Unauthenticated -> Authenticated` on login success and back
/// on logout; a failed login leaves the state unauthenticated. The epoch is
/// bumped on every successful login and every logout so that responses
/// belonging to a superseded session can be recognized and discarded.
pub struct SessionManager {
    backend: Arc<dyn Backend>,
    state: RwLock<SessionState>,
    epoch: AtomicU64,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (event_tx, _) = broadcast::channel(32);
        Self {
            backend,
            state: RwLock::new(SessionState::default()),
            epoch: AtomicU64::new(0),
            event_tx,
        }
    }

    /// Subscribe to session transitions
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Snapshot of the current session state
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.authenticated
    }

    /// Read-only copy of the held credential, if any
    pub async fn credential(&self) -> Option<Credential> {
        self.state.read().await.credential.clone()
    }

    /// Current session epoch
    pub fn epoch(&self) -> SessionEpoch {
        SessionEpoch(self.epoch.load(Ordering::SeqCst))
    }

    /// Exchange credentials for a bearer token.
    ///
    /// On success the credential is stored, the state becomes authenticated
    /// and the epoch is bumped (a re-login supersedes the old session). On
    /// failure the state stays unauthenticated; the status message
    /// distinguishes bad credentials from an unreachable backend.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        self.state.write().await.status_message = "Connecting to the backend...".to_string();

        match self.backend.obtain_token(username, password).await {
            Ok(credential) => {
                {
                    let mut state = self.state.write().await;
                    state.authenticated = true;
                    state.credential = Some(credential.clone());
                    state.status_message = "Login successful. Welcome!".to_string();
                }
                self.epoch.fetch_add(1, Ordering::SeqCst);
                info!(username, "login succeeded");
                let _ = self.event_tx.send(SessionEvent::LoggedIn);
                Ok(credential)
            }
            Err(err) => {
                {
                    let mut state = self.state.write().await;
                    state.authenticated = false;
                    state.credential = None;
                    state.status_message = match &err {
                        AuthError::InvalidCredentials => {
                            "Login failed: wrong username or password.".to_string()
                        }
                        AuthError::BackendUnreachable(_) => {
                            "Could not reach the backend server.".to_string()
                        }
                        AuthError::MalformedResponse => {
                            "The backend returned an unexpected token response.".to_string()
                        }
                    };
                }
                warn!(username, "login failed: {err}");
                let _ = self.event_tx.send(SessionEvent::LoginFailed);
                Err(err)
            }
        }
    }

    /// Clear the credential and authenticated flag unconditionally.
    ///
    /// No network side effect; there is no server-side token revocation in
    /// this contract. Bumps the epoch so in-flight completions from the old
    /// session are discarded on arrival.
    pub async fn logout(&self) {
        {
            let mut state = self.state.write().await;
            state.authenticated = false;
            state.credential = None;
            state.status_message = "You have been logged out.".to_string();
        }
        self.epoch.fetch_add(1, Ordering::SeqCst);
        info!("logged out");
        let _ = self.event_tx.send(SessionEvent::LoggedOut);
    }
}
