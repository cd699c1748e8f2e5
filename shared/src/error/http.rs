//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::TemplateNotFound
            | Self::SubmissionNotFound
            | Self::TicketNotFound => StatusCode::NOT_FOUND,

            Self::EmailAlreadyRegistered => StatusCode::CONFLICT,

            Self::NotAuthenticated | Self::InvalidCredentials | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // form validation
            Self::RequiredField | Self::PasswordMismatch | Self::PasswordTooShort => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            Self::InvalidFormat => StatusCode::BAD_REQUEST,

            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
