//! Task collection synchronization

mod controller;

pub use controller::{SyncEvent, SyncState, TaskSyncController};
