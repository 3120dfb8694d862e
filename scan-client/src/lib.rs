//! Scan Client - barcode price lookup front end
//!
//! Resolves scanned barcodes to products (product service or CSV catalog),
//! registers new products and forwards label print requests to the print
//! bridge.

pub mod app;
pub mod config;
pub mod debounce;
pub mod error;
pub mod http;
pub mod printing;
pub mod registration;
pub mod resolver;
pub mod session;

pub use app::{ScanApp, UiCommand, View};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use printing::PrintForwarder;
pub use registration::ProductRegistrar;
pub use resolver::{Catalog, CatalogResolver, ClearPolicy, NetworkResolver, ProductResolver};
pub use session::{Effect, SessionEvent, SessionState, Tab};

// Re-export shared types for convenience
pub use shared::{BridgeMessage, Product, ProductCreate, ProductCreated};
