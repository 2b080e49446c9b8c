//! Login session ownership
//!
//! The credential lives in an explicitly owned [`SessionManager`] shared by
//! reference with the sync controller; there is no ambient global token.

mod manager;
mod state;

pub use manager::SessionManager;
pub use state::{Credential, SessionEpoch, SessionEvent, SessionState};
