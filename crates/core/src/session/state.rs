//! Session state types

use std::fmt;

/// Opaque bearer token proving an authenticated session to the backend.
///
/// Held only in memory, never persisted. Owned exclusively by the
/// [`SessionManager`](super::SessionManager); the sync controller reads it
/// on every request and never mutates it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw token text, for the Authorization header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

// Keep the token out of logs and debug dumps.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Identity of a login session, bumped on every login and logout.
///
/// Requests capture the epoch at send time; a completion arriving after the
/// epoch has moved belongs to a superseded session and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEpoch(pub u64);

/// Snapshot of the current session
#[derive(Debug, Clone)]
pub struct SessionState {
    pub authenticated: bool,
    pub credential: Option<Credential>,
    pub status_message: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            authenticated: false,
            credential: None,
            status_message: "Please log in.".to_string(),
        }
    }
}

/// Session transitions, broadcast to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    LoginFailed,
    LoggedOut,
}
