//! print-bridge - local label print bridge
//!
//! Accepts print commands from the scan front end over plain HTTP and logs
//! them. One allow-listed browser origin may call it; nothing else is
//! authenticated.

pub mod api;
pub mod config;
pub mod error;
pub mod logger;

pub use api::build_app;
pub use config::Config;
pub use error::{BridgeError, BridgeResult};
