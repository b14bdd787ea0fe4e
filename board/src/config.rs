use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_TABLE: &str = "tasks";

/// Where the remote table lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub table: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Collection endpoint, e.g. `http://127.0.0.1:3000/api/tasks`.
    pub fn table_url(&self) -> String {
        format!("{}/api/{}", self.api_url.trim_end_matches('/'), self.table)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            table: DEFAULT_TABLE.to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}
