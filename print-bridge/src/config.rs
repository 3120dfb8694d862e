//! Bridge configuration

use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://massirq.github.io";

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port (env: PORT)
    pub port: u16,
    /// The one browser origin allowed to call the bridge, `*` for any (env: ALLOWED_ORIGIN)
    pub allowed_origin: String,
    /// Fallback level when RUST_LOG is unset (env: LOG_LEVEL)
    pub log_level: String,
    /// JSON log lines (env: LOG_JSON)
    pub log_json: bool,
    /// Daily rolling log files go here when set (env: LOG_DIR)
    pub log_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            allowed_origin: std::env::var("ALLOWED_ORIGIN")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = origin.into();
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}
