/// Mock server configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port (`PORT`, default 8000)
    pub port: u16,
    /// Load demo data on start (`MOCK_SEED`, default true)
    pub seed: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            seed: std::env::var("MOCK_SEED")
                .map(|v| !matches!(v.as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        }
    }
}
