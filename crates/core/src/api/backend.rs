//! Backend interface
//!
//! Defines the transport seam between the session/sync logic and the remote
//! collection endpoint.

use async_trait::async_trait;

use crate::error::{AuthError, FetchError, MutationError};
use crate::session::Credential;
use crate::task::{Task, TaskId};

/// Transport interface for the five backend operations
#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn obtain_token(&self, username: &str, password: &str)
        -> Result<Credential, AuthError>;

    /// Read the full task collection
    async fn list_tasks(&self, credential: &Credential) -> Result<Vec<Task>, FetchError>;

    /// Create a task with `completed` defaulted to false.
    ///
    /// The created task's id is obtained through the follow-up refresh, so
    /// success carries no payload.
    async fn create_task(
        &self,
        credential: &Credential,
        title: &str,
        description: &str,
    ) -> Result<(), MutationError>;

    /// Partially update a task's completion flag
    async fn set_completed(
        &self,
        credential: &Credential,
        id: TaskId,
        completed: bool,
    ) -> Result<(), MutationError>;

    /// Delete a task by id
    async fn delete_task(&self, credential: &Credential, id: TaskId)
        -> Result<(), MutationError>;
}
