//! Request extractors that reject with [`AppError`]

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Json, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};

use crate::state::AppState;

/// JSON body whose rejection renders as an `InvalidFormat` error body
/// instead of axum's plain-text one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(invalid_body)
    }
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    AppError::with_message(ErrorCode::InvalidFormat, rejection.body_text())
}

/// User behind the `Authorization` header, with or without `Bearer `
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|v| {
                let v = v.trim();
                v.strip_prefix("Bearer ").unwrap_or(v).trim()
            })
            .filter(|t| !t.is_empty())
            .ok_or_else(AppError::not_authenticated)?;

        let store = state.store.read().await;
        let user = store.user_by_token(token).ok_or_else(|| {
            tracing::warn!(uri = %parts.uri, "Unknown or revoked token");
            AppError::invalid_token("Unknown or revoked token")
        })?;
        Ok(Self {
            id: user.id,
            name: user.name.clone(),
        })
    }
}
