//! Form components: Builder/Editor, Renderer, Submission Viewer, work orders.
//!
//! Each component owns the data it fetched and borrows an API client only
//! for the duration of a call.

mod builder;
mod editor;
mod layout;
mod renderer;
mod viewer;
mod work_order;

pub use builder::{FormBuilder, SavedTemplate};
pub use editor::TemplateEditor;
pub use layout::{FieldExtent, insertion_index};
pub use renderer::{Advisory, FormRenderer, LoadState};
pub use viewer::{CREATED_AT_COLUMN, DuplicateLabel, PivotRow, PivotTable, SubmissionViewer};
pub use work_order::WorkOrderEditor;
