//! Helpdesk Client - API client and form components
//!
//! Provides the HTTP plumbing for the help-desk backend, an explicit session
//! context, and the form Builder/Editor, Renderer and Submission Viewer.

pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod session;

pub use client::{
    DirectoryApi, HelpdeskClient, HttpClient, InventoryApi, NetworkHttpClient, SubmissionApi,
    TemplateApi, TicketApi,
};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, Recovery};
pub use forms::{
    Advisory, DuplicateLabel, FieldExtent, FormBuilder, FormRenderer, LoadState, PivotTable,
    SavedTemplate, SubmissionViewer, TemplateEditor, WorkOrderEditor,
};
pub use session::{Session, SessionStore};

// Re-export shared types for convenience
pub use shared::client::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
pub use shared::models;
