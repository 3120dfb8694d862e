//! Product registration
//!
//! `POST {base}/api/products` with the five form fields.

use crate::{ClientError, ClientResult, HttpClient};
use shared::{ProductCreate, ProductCreated};
use tracing::{info, instrument, warn};

/// Registers new products with the product service
#[derive(Debug, Clone)]
pub struct ProductRegistrar {
    http: HttpClient,
    base_url: String,
}

impl ProductRegistrar {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    #[instrument(skip_all, fields(barcode = %product.barcode))]
    pub async fn add_product(&self, product: &ProductCreate) -> ClientResult<ProductCreated> {
        let url = HttpClient::endpoint(&self.base_url, &["api", "products"])?;
        let created: ProductCreated = self.http.post(url, product).await.inspect_err(|e| {
            warn!(error = %e, "Product registration failed");
        })?;
        info!(product_id = %created.product_id, "Product registered");
        Ok(created)
    }
}

/// Confirmation shown after a successful registration
pub fn registration_success_message(created: &ProductCreated) -> String {
    format!("Product added successfully with ID: {}", created.product_id)
}

/// Operator-facing text for a failed registration
///
/// Distinguishes an error status from the server, a request that got no
/// response, and a request that could not be sent at all.
pub fn registration_failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Remote { status, body } => {
            format!("Failed to add product: {} - {}", status.as_u16(), body)
        }
        ClientError::NetworkUnreachable(_) => {
            "No response from the server. Check your server connection.".to_string()
        }
        other => format!("Request error: {}", other.detail()),
    }
}
