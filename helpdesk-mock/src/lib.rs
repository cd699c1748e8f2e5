//! In-memory help-desk backend
//!
//! Implements the template, submission, work-order, ticket, directory, auth
//! and inventory endpoints over a process-local store. Used for local
//! development and by the client's integration tests.

pub mod api;
pub mod config;
pub mod extract;
pub mod state;

pub use api::router;
pub use config::Config;
pub use state::AppState;
