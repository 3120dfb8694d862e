use super::{ClearPolicy, ProductResolver};
use crate::{ClientError, ClientResult, HttpClient};
use async_trait::async_trait;
use reqwest::StatusCode;
use shared::Product;
use tracing::{debug, instrument, warn};

/// Per-lookup query against `GET {base}/api/product/{barcode}`
#[derive(Debug, Clone)]
pub struct NetworkResolver {
    http: HttpClient,
    base_url: String,
}

impl NetworkResolver {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ProductResolver for NetworkResolver {
    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn resolve(&self, barcode: &str) -> ClientResult<Product> {
        let barcode = shared::barcode::normalize(barcode).ok_or(ClientError::EmptyInput)?;
        let url = HttpClient::endpoint(&self.base_url, &["api", "product", barcode])?;

        let response = self.http.get_raw(url).await.inspect_err(|e| {
            warn!(error = %e.detail(), "Product lookup failed");
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Product service answered 404");
            return Err(ClientError::NotFound);
        }

        let response = HttpClient::ensure_success(response).await?;
        let body = response.text().await?;
        let products: Vec<Product> = serde_json::from_str(&body)?;
        debug!(count = products.len(), "Product service answered");

        products.into_iter().next().ok_or(ClientError::NotFound)
    }

    fn clear_policy(&self) -> ClearPolicy {
        ClearPolicy::IMMEDIATE
    }
}
