//! Login / register / logout and session restore.

use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use shared::client::{AuthResponse, LoginRequest, RegisterRequest};

use super::common::HelpdeskClient;
use super::http::HttpClient;

impl<H: HttpClient> HelpdeskClient<H> {
    /// `POST /login` and start a session.
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<&Session> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.http.post("/login", &req).await.inspect_err(|e| {
            tracing::error!(email, error = %e, "Login failed");
        })?;
        tracing::info!(email, "Logged in");
        Ok(self.start_session(Session::from(auth)))
    }

    /// `POST /register` and start a session.
    ///
    /// A mismatching confirmation is refused before any request is sent.
    pub async fn register(&mut self, req: &RegisterRequest) -> ClientResult<&Session> {
        if !req.passwords_match() {
            return Err(ClientError::PasswordMismatch);
        }
        let auth: AuthResponse = self.http.post("/register", req).await.inspect_err(|e| {
            tracing::error!(email = %req.email, error = %e, "Registration failed");
        })?;
        tracing::info!(email = %req.email, "Registered");
        Ok(self.start_session(Session::from(auth)))
    }

    /// Tear the session down, in memory and on disk.
    pub fn logout(&mut self) -> ClientResult<()> {
        let ended = self.end_session();
        if let Some(store) = &self.store {
            store.clear()?;
        }
        if let Some(session) = ended {
            tracing::info!(email = %session.user.email, "Logged out");
        }
        Ok(())
    }

    /// Load a persisted session, if any. Returns whether one was restored.
    ///
    /// An unreadable session file is discarded rather than reported.
    pub fn restore_session(&mut self) -> ClientResult<bool> {
        let Some(store) = &self.store else {
            return Ok(false);
        };
        match store.load() {
            Ok(Some(session)) => {
                tracing::debug!(email = %session.user.email, "Session restored");
                self.http.set_token(Some(session.token.clone()));
                self.session = Some(session);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(ClientError::Serialization(e)) => {
                tracing::warn!(path = %store.path().display(), error = %e, "Discarding corrupt session file");
                store.clear()?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
