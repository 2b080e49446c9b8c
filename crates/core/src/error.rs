//! Error types for the core library
//!
//! One enum per failure surface: authentication, collection refresh, and
//! mutations. Refresh and mutation failures are soft: they leave the held
//! state untouched and never invalidate the session.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the login operation
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the credentials (non-2xx token response)
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The backend could not be reached at all
    #[error("backend unreachable: {0}")]
    BackendUnreachable(String),

    /// The token response was 2xx but carried no access credential
    #[error("token response did not contain an access credential")]
    MalformedResponse,
}

/// Errors from a collection refresh
#[derive(Debug, Error)]
pub enum FetchError {
    /// The backend answered with a non-success status
    #[error("task list request failed: HTTP {status}")]
    Status { status: StatusCode },

    /// The backend could not be reached
    #[error("backend unreachable: {0}")]
    Network(String),

    /// No credential is held; log in first
    #[error("not authenticated")]
    NotAuthenticated,

    /// The session changed while the request was in flight; the response
    /// was discarded without touching held state
    #[error("session changed while the request was in flight")]
    StaleSession,
}

/// Errors from a create, toggle, or delete operation
#[derive(Debug, Error)]
pub enum MutationError {
    /// The backend rejected the mutation. `detail` carries the backend's
    /// JSON error payload verbatim, for display without interpretation.
    #[error("backend rejected the mutation (HTTP {status}): {detail}")]
    Rejected {
        status: StatusCode,
        detail: serde_json::Value,
    },

    /// The backend could not be reached
    #[error("backend unreachable: {0}")]
    Network(String),

    /// Empty titles are rejected before any request is sent
    #[error("task title must not be empty")]
    EmptyTitle,

    /// No credential is held; log in first
    #[error("not authenticated")]
    NotAuthenticated,

    /// The session changed while the request was in flight; the response
    /// was discarded without touching held state
    #[error("session changed while the request was in flight")]
    StaleSession,

    /// The mutation was acknowledged but the follow-up refresh failed.
    /// The write landed on the backend; the local view is stale until the
    /// next successful refresh.
    #[error("the change was saved but the follow-up refresh failed: {0}")]
    RefreshAfterWrite(#[source] FetchError),
}
