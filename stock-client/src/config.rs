//! Client configuration

use std::path::PathBuf;

use crate::{ClientError, ClientResult};

/// Default inventory service API root
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Client configuration for connecting to the inventory service
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | STOCK_API_URL | http://localhost:8080/api | API root |
/// | STOCK_DATA_DIR | .stock-client | token file and logs |
/// | STOCK_TIMEOUT_SECS | 30 | request timeout |
/// | STOCK_LOG_LEVEL | info | default log level |
/// | STOCK_INVALIDATE_ON_FORBIDDEN | true | treat 403 like 401 |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. "http://localhost:8080/api"
    pub base_url: String,

    /// Directory holding `session.json`
    pub data_dir: PathBuf,

    /// Request timeout in seconds
    pub timeout: u64,

    pub log_level: String,

    /// Whether a 403 also ends the session
    pub invalidate_on_forbidden: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            data_dir: PathBuf::from(".stock-client"),
            timeout: 30,
            log_level: "info".into(),
            invalidate_on_forbidden: true,
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("STOCK_API_URL").unwrap_or(defaults.base_url),
            data_dir: std::env::var("STOCK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            timeout: std::env::var("STOCK_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout),
            log_level: std::env::var("STOCK_LOG_LEVEL").unwrap_or(defaults.log_level),
            invalidate_on_forbidden: std::env::var("STOCK_INVALIDATE_ON_FORBIDDEN")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.invalidate_on_forbidden),
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_invalidate_on_forbidden(mut self, enabled: bool) -> Self {
        self.invalidate_on_forbidden = enabled;
        self
    }

    /// Path of the persisted session file
    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join(crate::session::SESSION_FILE)
    }

    /// Base URL without a trailing slash
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> ClientResult<()> {
        let root = self.api_root();
        if !(root.starts_with("http://") || root.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("timeout must be positive".into()));
        }
        Ok(())
    }

    /// Create a client talking to the network service
    pub fn build_client(&self) -> ClientResult<crate::StockClient> {
        crate::StockClient::connect(self.clone())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_paths() {
        let config = ClientConfig::new("https://stock.example.com/api/")
            .with_data_dir("/tmp/stock")
            .with_timeout(5)
            .with_invalidate_on_forbidden(false);

        assert_eq!(config.api_root(), "https://stock.example.com/api");
        assert_eq!(config.session_file(), PathBuf::from("/tmp/stock/session.json"));
        assert!(!config.invalidate_on_forbidden);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ClientConfig::new("localhost:8080").validate().is_err());
        assert!(ClientConfig::default().with_timeout(0).validate().is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
