//! Shared types for the help-desk form engine
//!
//! Models, auth DTOs and the structured error vocabulary used by the mock
//! backend, the API client and the console.

pub mod client;
pub mod error;
pub mod models;
pub mod util;
