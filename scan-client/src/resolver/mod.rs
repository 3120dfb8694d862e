//! Product resolvers
//!
//! Map a barcode to a [`Product`]. Two variants:
//!
//! - [`NetworkResolver`]: one request to the product service per lookup
//! - [`CatalogResolver`]: downloads the CSV export once, then scans it in memory
//!
//! Both report absence as [`ClientError::NotFound`] and reject blank input
//! with [`ClientError::EmptyInput`] before doing any I/O.
//!
//! [`ClientError::NotFound`]: crate::ClientError::NotFound
//! [`ClientError::EmptyInput`]: crate::ClientError::EmptyInput

mod catalog;
mod network;

pub use catalog::{Catalog, CatalogResolver};
pub use network::NetworkResolver;

use crate::ClientResult;
use async_trait::async_trait;
use shared::Product;
use std::time::Duration;

/// How long a lookup result stays in the input field before it is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearPolicy {
    pub found: Duration,
    pub not_found: Duration,
    pub error: Duration,
}

impl ClearPolicy {
    /// Clear as soon as the lookup completes
    pub const IMMEDIATE: Self = Self {
        found: Duration::ZERO,
        not_found: Duration::ZERO,
        error: Duration::ZERO,
    };

    /// Keep a hit visible briefly, drop a miss quickly
    pub const CATALOG: Self = Self {
        found: Duration::from_millis(500),
        not_found: Duration::from_millis(100),
        error: Duration::from_millis(100),
    };
}

impl Default for ClearPolicy {
    fn default() -> Self {
        Self::IMMEDIATE
    }
}

/// Barcode to product lookup
#[async_trait]
pub trait ProductResolver: Send + Sync {
    /// One-time preparation when a session starts
    async fn load(&self) -> ClientResult<()> {
        Ok(())
    }

    async fn resolve(&self, barcode: &str) -> ClientResult<Product>;

    fn clear_policy(&self) -> ClearPolicy;
}
