//! Endpoint URLs.

/// Default service host.
pub const DEFAULT_API_HOST: &str = "https://api.telegram.org";

/// Builds endpoint URLs for one service host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Api {
    host: String,
}

impl Default for Api {
    fn default() -> Self {
        Self::new(DEFAULT_API_HOST)
    }
}

impl Api {
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            host: host.trim_end_matches('/').to_string(),
        }
    }

    /// The service host, without trailing slash.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// `{host}/bot{token}/{method}`
    pub fn method_url(&self, token: &str, method: &str) -> String {
        format!("{}/bot{}/{}", self.host, token, method)
    }

    /// `{host}/file/bot{token}/{file_path}`
    pub fn file_url(&self, token: &str, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.host,
            token,
            file_path.trim_start_matches('/')
        )
    }
}
