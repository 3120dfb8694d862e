//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Thin wrapper over `reqwest` shared by every outbound call
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { client })
    }

    /// Join path segments onto a base URL, percent-encoding each segment
    pub fn endpoint(base: &str, segments: &[&str]) -> ClientResult<Url> {
        let mut url =
            Url::parse(base).map_err(|e| ClientError::Config(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("{}: not a base URL", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET without any status handling
    pub async fn get_raw(&self, url: Url) -> ClientResult<Response> {
        Ok(self.client.get(url).send().await?)
    }

    /// GET returning the body as text
    pub async fn get_text(&self, url: Url) -> ClientResult<String> {
        let response = self.client.get(url).send().await?;
        Ok(Self::ensure_success(response).await?.text().await?)
    }

    /// GET with query parameters, any 2xx body returned as text
    pub async fn get_text_with_query<Q: Serialize + ?Sized>(
        &self,
        url: Url,
        query: &Q,
    ) -> ClientResult<String> {
        let response = self.client.get(url).query(query).send().await?;
        Ok(Self::ensure_success(response).await?.text().await?)
    }

    /// POST with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Turn a non-2xx response into [`ClientError::Remote`]
    pub async fn ensure_success(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Remote { status, body });
        }
        Ok(response)
    }

    /// Handle the HTTP response
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let response = Self::ensure_success(response).await?;
        response.json().await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let url = HttpClient::endpoint("https://scan.interpos.dk/", &["api", "product", "123"]).unwrap();
        assert_eq!(url.as_str(), "https://scan.interpos.dk/api/product/123");

        let url = HttpClient::endpoint("http://host:8080/base", &["api", "products"]).unwrap();
        assert_eq!(url.as_str(), "http://host:8080/base/api/products");
    }

    #[test]
    fn test_endpoint_encodes_barcode() {
        let url = HttpClient::endpoint("http://host", &["api", "product", "a/b c"]).unwrap();
        assert_eq!(url.path(), "/api/product/a%2Fb%20c");
    }

    #[test]
    fn test_endpoint_rejects_bad_base() {
        assert!(matches!(
            HttpClient::endpoint("not a url", &["api"]),
            Err(ClientError::Config(_))
        ));
    }
}
