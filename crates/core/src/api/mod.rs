//! Backend transport
//!
//! The [`Backend`] trait is the seam between session/sync logic and the
//! wire; [`ApiClient`] is the HTTP implementation.

mod backend;
mod client;

pub use backend::Backend;
pub use client::ApiClient;
