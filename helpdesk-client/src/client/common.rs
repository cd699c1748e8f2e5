//! Core `HelpdeskClient` definition and session plumbing.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::{Session, SessionStore};

use super::http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
use super::http_oneshot::OneshotHttpClient;

// ============================================================================
// Core HelpdeskClient Definition
// ============================================================================

/// Typed client for the help-desk API.
///
/// The client is the session context: login and register initialise it,
/// logout tears it down, and the transport sends the session token with
/// every request. Form components borrow the client for the duration of a
/// call and never hold on to it.
///
/// # Example
///
/// ```no_run
/// use helpdesk_client::{ClientConfig, HelpdeskClient, TemplateApi};
///
/// # async fn example() -> Result<(), helpdesk_client::ClientError> {
/// let mut client = HelpdeskClient::new(ClientConfig::from_env())?;
/// client.login("ana@example.com", "secret").await?;
/// let templates = client.list_templates().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HelpdeskClient<H: HttpClient = NetworkHttpClient> {
    pub(crate) http: H,
    /// Separate transport for the inventory service, when configured
    pub(crate) inventory: Option<NetworkHttpClient>,
    pub(crate) config: ClientConfig,
    pub(crate) session: Option<Session>,
    pub(crate) store: Option<SessionStore>,
}

impl HelpdeskClient<NetworkHttpClient> {
    /// Creates a network client from configuration.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = NetworkHttpClient::new(&config.base_url, config.timeout_duration())?;
        Self::with_http(http, config)
    }
}

#[cfg(feature = "in-process")]
impl HelpdeskClient<OneshotHttpClient> {
    /// Creates a client that calls an axum router in-process.
    pub fn in_process(router: axum::Router, config: ClientConfig) -> ClientResult<Self> {
        Self::with_http(OneshotHttpClient::new(router), config)
    }
}

impl<H: HttpClient> HelpdeskClient<H> {
    /// Creates a client over an existing transport.
    pub fn with_http(http: H, config: ClientConfig) -> ClientResult<Self> {
        let inventory = config
            .inventory_url
            .as_deref()
            .map(|url| NetworkHttpClient::new(url, config.timeout_duration()))
            .transpose()?;
        let store = config.data_dir.as_deref().map(SessionStore::new);
        Ok(Self {
            http,
            inventory,
            config,
            session: None,
            store,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_store(&self) -> Option<&SessionStore> {
        self.store.as_ref()
    }

    /// Returns the session or `NotAuthenticated`.
    pub fn require_session(&self) -> ClientResult<&Session> {
        self.session.as_ref().ok_or(ClientError::NotAuthenticated)
    }

    /// Shareable renderer link for a template
    pub fn form_link(&self, template_id: i64) -> String {
        self.config.form_link(template_id)
    }

    /// Installs a session: token into the transport, file on disk.
    pub(crate) fn start_session(&mut self, session: Session) -> &Session {
        self.http.set_token(Some(session.token.clone()));
        if let Some(store) = &self.store
            && let Err(e) = store.save(&session)
        {
            tracing::warn!(path = %store.path().display(), error = %e, "Failed to persist session");
        }
        self.session.insert(session)
    }

    /// Drops the session from memory and the transport.
    pub(crate) fn end_session(&mut self) -> Option<Session> {
        self.http.set_token(None);
        self.session.take()
    }
}
