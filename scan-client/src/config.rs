//! Client configuration

use std::time::Duration;

/// Default product service
pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://scan.interpos.dk";
/// Default print bridge (runs next to the label printer)
pub const DEFAULT_BRIDGE_URL: &str = "http://localhost:5000";
/// Scanner bursts inside this window collapse into one lookup
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Endpoints and timings for the scanning client
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | LOOKUP_BASE_URL | https://scan.interpos.dk | product service (lookup + registration) |
/// | CATALOG_URL | - | published CSV export, catalog mode only |
/// | BRIDGE_URL | http://localhost:5000 | print bridge |
/// | REQUEST_TIMEOUT_SECS | 30 | per-request timeout |
/// | DEBOUNCE_MS | 150 | input debounce window |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Product service base URL (e.g., "https://scan.interpos.dk")
    pub lookup_base_url: String,

    /// Published spreadsheet CSV export
    pub catalog_url: Option<String>,

    /// Print bridge base URL
    pub bridge_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Debounce window in milliseconds
    pub debounce_ms: u64,
}

impl ClientConfig {
    /// Create a configuration with the given product service and defaults
    pub fn new(lookup_base_url: impl Into<String>) -> Self {
        Self {
            lookup_base_url: lookup_base_url.into(),
            catalog_url: None,
            bridge_url: DEFAULT_BRIDGE_URL.to_string(),
            timeout: 30,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            lookup_base_url: std::env::var("LOOKUP_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LOOKUP_BASE_URL.into()),
            catalog_url: std::env::var("CATALOG_URL").ok().filter(|s| !s.is_empty()),
            bridge_url: std::env::var("BRIDGE_URL").unwrap_or_else(|_| DEFAULT_BRIDGE_URL.into()),
            timeout: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            debounce_ms: std::env::var("DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DEBOUNCE_MS),
        }
    }

    /// Set the catalog CSV URL
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = Some(url.into());
        self
    }

    /// Set the print bridge URL
    pub fn with_bridge_url(mut self, url: impl Into<String>) -> Self {
        self.bridge_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the debounce window
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_BASE_URL)
    }
}
