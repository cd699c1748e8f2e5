//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the help-desk backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:8000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Public base URL of the form renderer, used to build shareable links
    pub form_base_url: String,

    /// Inventory service base URL (`POST {inventory_url}/tabla`)
    pub inventory_url: Option<String>,

    /// Prefix of the asset edit page; the asset code is appended
    pub asset_edit_url: String,

    /// Directory holding `auth/session.json`; `None` keeps the session in memory only
    pub data_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            form_base_url: "http://localhost:5173".to_string(),
            inventory_url: None,
            asset_edit_url: "http://app.quar.com.co/editar/computador/".to_string(),
            data_dir: None,
        }
    }

    /// Read configuration from `HELPDESK_*` environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::new(
            std::env::var("HELPDESK_API_URL").unwrap_or_else(|_| "http://localhost:8000".into()),
        );
        config.timeout = std::env::var("HELPDESK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if let Ok(url) = std::env::var("HELPDESK_FORM_URL") {
            config.form_base_url = url;
        }
        config.inventory_url = std::env::var("HELPDESK_INVENTORY_URL").ok();
        if let Ok(url) = std::env::var("HELPDESK_ASSET_EDIT_URL") {
            config.asset_edit_url = url;
        }
        config.data_dir = Some(
            std::env::var("HELPDESK_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".helpdesk")),
        );
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the renderer base URL
    pub fn with_form_base_url(mut self, url: impl Into<String>) -> Self {
        self.form_base_url = url.into();
        self
    }

    /// Set the inventory service URL
    pub fn with_inventory_url(mut self, url: impl Into<String>) -> Self {
        self.inventory_url = Some(url.into());
        self
    }

    /// Set the asset edit page prefix
    pub fn with_asset_edit_url(mut self, url: impl Into<String>) -> Self {
        self.asset_edit_url = url.into();
        self
    }

    /// Persist the session under this directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Shareable renderer link for a template
    pub fn form_link(&self, template_id: i64) -> String {
        form_link(&self.form_base_url, template_id)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

/// `{base}/ver-formulario?id={id}`
pub fn form_link(base: &str, template_id: i64) -> String {
    format!(
        "{}/ver-formulario?id={}",
        base.trim_end_matches('/'),
        template_id
    )
}
