//! Client module - API client over a pluggable HTTP transport.
//!
//! [`HelpdeskClient`] owns the session context and talks to the backend
//! through any [`HttpClient`]: the network client by default, or the
//! in-process oneshot client with the "in-process" feature.

mod api;
mod auth;
mod common;
pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use api::{DirectoryApi, InventoryApi, SubmissionApi, TemplateApi, TicketApi};
pub use common::HelpdeskClient;
pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
