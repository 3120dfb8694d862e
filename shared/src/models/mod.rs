//! Data models
//!
//! Shared between the scanning client and the print bridge (via HTTP).
//! Field names follow the camelCase JSON used by the product service.

pub mod print;
pub mod product;

// Re-exports
pub use print::*;
pub use product::*;
