//! Print request forwarder
//!
//! Sends "print price label" commands to the local print bridge as a GET
//! with query parameters. The bridge answers `{ "message": .. }` either way;
//! any 2xx counts as accepted whatever the body.

use crate::{ClientError, ClientResult, HttpClient};
use shared::{BridgeMessage, PrintQuery, Product};
use tracing::{info, instrument, warn};

/// Alert shown when the bridge accepted the label
pub const PRINT_SENT_MESSAGE: &str = "Data sent to server for printing!";

/// Forwards label print requests to the bridge
#[derive(Debug, Clone)]
pub struct PrintForwarder {
    http: HttpClient,
    bridge_url: String,
}

impl PrintForwarder {
    pub fn new(http: HttpClient, bridge_url: impl Into<String>) -> Self {
        Self {
            http,
            bridge_url: bridge_url.into(),
        }
    }

    /// Send a label request; no product means nothing to print
    #[instrument(skip_all, fields(bridge = %self.bridge_url))]
    pub async fn send(&self, product: Option<&Product>) -> ClientResult<Option<BridgeMessage>> {
        let Some(product) = product else {
            return Ok(None);
        };

        let query = PrintQuery::for_product(product);
        let url = reqwest::Url::parse(&self.bridge_url)
            .map_err(|e| ClientError::Config(format!("{}: {}", self.bridge_url, e)))?;

        match self.http.get_text_with_query(url, &query).await {
            Ok(body) => {
                let ack = serde_json::from_str::<BridgeMessage>(&body)
                    .unwrap_or_else(|_| BridgeMessage::new(body.trim()));
                info!(barcode = %product.barcode, price = ?query.price, "Label sent to bridge");
                Ok(Some(ack))
            }
            Err(e) => {
                warn!(barcode = %product.barcode, error = %e, "Bridge rejected label");
                Err(e)
            }
        }
    }
}

/// Alert text for a failed print: the bridge's own message if it sent one
pub fn print_failure_message(err: &ClientError) -> String {
    let reason = err.server_message().unwrap_or_else(|| err.detail());
    format!("An error occurred while sending: {}", reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_failure_message_uses_bridge_message() {
        let err = ClientError::Remote {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"message":"Invalid command"}"#.into(),
        };
        assert_eq!(
            print_failure_message(&err),
            "An error occurred while sending: Invalid command"
        );
    }

    #[test]
    fn test_failure_message_falls_back_to_transport_text() {
        let err = ClientError::NetworkUnreachable("error sending request".into());
        assert_eq!(
            print_failure_message(&err),
            "An error occurred while sending: error sending request"
        );
    }

    #[tokio::test]
    async fn test_send_without_product_is_noop() {
        let http = crate::ClientConfig::default().build_http_client().unwrap();
        // unroutable on purpose: nothing must be sent
        let forwarder = PrintForwarder::new(http, "http://127.0.0.1:1");
        assert!(forwarder.send(None).await.unwrap().is_none());
    }
}
