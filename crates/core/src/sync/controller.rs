//! Task synchronization controller
//!
//! Owns the in-memory task collection. Every mutation ends in a full
//! collection refetch, so the displayed collection is exactly what the
//! backend holds immediately after any acknowledged write. The cost of the
//! extra round trip per mutation buys freedom from client/server drift.

use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

use crate::api::Backend;
use crate::error::{FetchError, MutationError};
use crate::session::{Credential, SessionEpoch, SessionManager};
use crate::task::{Task, TaskId};

/// Snapshot of the synchronized collection
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    /// Tasks in backend order, unique by id
    pub tasks: Vec<Task>,
    /// True while a refresh is in flight
    pub loading: bool,
}

/// Collection changes, broadcast to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    RefreshStarted,
    Refreshed { count: usize },
    RefreshFailed,
    Cleared,
}

/// Issues the four task operations and re-establishes a consistent local
/// view after every mutation.
///
/// The collection changes only through completed refresh results; mutations
/// never patch it locally. Requests read the credential from the session on
/// every call and capture the session epoch at send time; completions
/// arriving after the epoch has moved are discarded.
pub struct TaskSyncController {
    backend: Arc<dyn Backend>,
    session: Arc<SessionManager>,
    state: RwLock<SyncState>,
    event_tx: broadcast::Sender<SyncEvent>,
}

impl TaskSyncController {
    pub fn new(backend: Arc<dyn Backend>, session: Arc<SessionManager>) -> Self {
        let (event_tx, _) = broadcast::channel(32);
        Self {
            backend,
            session,
            state: RwLock::new(SyncState::default()),
            event_tx,
        }
    }

    /// Subscribe to collection changes
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.event_tx.subscribe()
    }

    /// Snapshot of the current collection state
    pub async fn state(&self) -> SyncState {
        self.state.read().await.clone()
    }

    /// The held task collection, in backend order
    pub async fn tasks(&self) -> Vec<Task> {
        self.state.read().await.tasks.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Replace the held collection with the backend's current one.
    ///
    /// On failure the held collection is left unchanged; a failed refresh is
    /// a soft error and does not invalidate the session.
    pub async fn refresh(&self) -> Result<Vec<Task>, FetchError> {
        let Some((credential, epoch)) = self.request_context().await else {
            return Err(FetchError::NotAuthenticated);
        };

        self.set_loading(true).await;
        let _ = self.event_tx.send(SyncEvent::RefreshStarted);

        let result = self.backend.list_tasks(&credential).await;
        self.set_loading(false).await;

        if self.session.epoch() != epoch {
            debug!("discarding refresh completion from a superseded session");
            return Err(FetchError::StaleSession);
        }

        match result {
            Ok(tasks) => {
                self.state.write().await.tasks = tasks.clone();
                let _ = self.event_tx.send(SyncEvent::Refreshed {
                    count: tasks.len(),
                });
                Ok(tasks)
            }
            Err(err) => {
                warn!("refresh failed: {err}");
                let _ = self.event_tx.send(SyncEvent::RefreshFailed);
                Err(err)
            }
        }
    }

    /// Create a task with `completed` defaulted to false, then refetch.
    ///
    /// Empty (all-whitespace) titles are rejected before any request is
    /// sent. The server-assigned id arrives through the refresh.
    pub async fn create(&self, title: &str, description: &str) -> Result<(), MutationError> {
        if title.trim().is_empty() {
            return Err(MutationError::EmptyTitle);
        }
        let Some((credential, epoch)) = self.request_context().await else {
            return Err(MutationError::NotAuthenticated);
        };

        let result = self
            .backend
            .create_task(&credential, title, description)
            .await;
        self.complete_mutation(epoch, result).await
    }

    /// Flip the completion flag of the given task, then refetch
    pub async fn toggle(&self, task: &Task) -> Result<(), MutationError> {
        let Some((credential, epoch)) = self.request_context().await else {
            return Err(MutationError::NotAuthenticated);
        };

        let result = self
            .backend
            .set_completed(&credential, task.id, !task.completed)
            .await;
        self.complete_mutation(epoch, result).await
    }

    /// Delete the task with the given id, then refetch.
    ///
    /// The presentation layer is responsible for obtaining explicit user
    /// confirmation before calling this; the controller imposes none.
    pub async fn delete(&self, task_id: TaskId) -> Result<(), MutationError> {
        let Some((credential, epoch)) = self.request_context().await else {
            return Err(MutationError::NotAuthenticated);
        };

        let result = self.backend.delete_task(&credential, task_id).await;
        self.complete_mutation(epoch, result).await
    }

    /// Drop the held collection.
    ///
    /// Called by the presentation layer on logout so a logged-out session
    /// never displays stale tasks.
    pub async fn clear(&self) {
        {
            let mut state = self.state.write().await;
            state.tasks.clear();
            state.loading = false;
        }
        let _ = self.event_tx.send(SyncEvent::Cleared);
    }

    async fn request_context(&self) -> Option<(Credential, SessionEpoch)> {
        let credential = self.session.credential().await?;
        Some((credential, self.session.epoch()))
    }

    async fn set_loading(&self, loading: bool) {
        self.state.write().await.loading = loading;
    }

    /// Shared tail of every mutation: discard stale completions, surface
    /// mutation errors, then refetch the authoritative collection.
    async fn complete_mutation(
        &self,
        epoch: SessionEpoch,
        result: Result<(), MutationError>,
    ) -> Result<(), MutationError> {
        if self.session.epoch() != epoch {
            debug!("discarding mutation completion from a superseded session");
            return Err(MutationError::StaleSession);
        }
        result?;

        match self.refresh().await {
            Ok(_) => Ok(()),
            Err(err) => Err(MutationError::RefreshAfterWrite(err)),
        }
    }
}
