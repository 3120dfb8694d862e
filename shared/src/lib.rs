//! Shared types for the scan workspace
//!
//! Wire types used by both the scanning client and the print bridge,
//! plus the small string helpers both sides agree on (price display,
//! barcode cleanup).

pub mod barcode;
pub mod models;
pub mod price;

// Re-exports
pub use models::{BridgeMessage, PrintQuery, Product, ProductCreate, ProductCreated, ProductId};
pub use price::{CURRENCY_SUFFIX, format_price, printable_price};
pub use serde::{Deserialize, Serialize};
