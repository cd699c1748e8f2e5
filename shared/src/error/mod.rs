//! Error vocabulary shared by the mock backend and the client
//!
//! Codes are grouped by range (see [`ErrorCategory`]): 0xxx general, 1xxx
//! auth, 3xxx template, 4xxx submission and ticket, 9xxx system.
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::PasswordMismatch).with_detail("field", "password_confirmation");
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, 1006);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
