//! Data models
//!
//! Shared between the mock backend, the API client and the console.
//! Server ids are `i64`; field ids are client-generated strings.

pub mod asset;
pub mod category;
pub mod field;
pub mod submission;
pub mod technician;
pub mod template;
pub mod ticket;

// Re-exports
pub use asset::*;
pub use category::*;
pub use field::*;
pub use submission::*;
pub use technician::*;
pub use template::*;
pub use ticket::*;
