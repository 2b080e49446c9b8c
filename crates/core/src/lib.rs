//! Core library for TaskDeck
//!
//! Session and task synchronization against a remote HTTP+JSON backend:
//! - Session management (credential ownership, login/logout, session epoch)
//! - Task collection synchronization (create/toggle/delete, each ending in
//!   a full collection refetch)
//! - Backend transport (the `Backend` trait seam and the HTTP client)

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod sync;
pub mod task;

pub use api::{ApiClient, Backend};
pub use config::Config;
pub use error::{AuthError, FetchError, MutationError};
pub use session::{Credential, SessionEvent, SessionManager, SessionState};
pub use sync::{SyncEvent, SyncState, TaskSyncController};
pub use task::{Task, TaskId};
