//! Print bridge wire types

use serde::{Deserialize, Serialize};

use super::Product;

/// The only command the bridge accepts
pub const PRINT_COMMAND: &str = "print";

/// Query parameters of a bridge request
///
/// The client always fills every field it has; the bridge extracts all of
/// them as optional so a malformed request still reaches the command check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintQuery {
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub product_name: Option<String>,
    /// Cleaned numeric price, no currency suffix
    pub price: Option<String>,
}

impl PrintQuery {
    /// Label print request for a resolved product
    pub fn for_product(product: &Product) -> Self {
        Self {
            command: Some(PRINT_COMMAND.to_string()),
            company: product.brand_name.clone().filter(|b| !b.is_empty()),
            product_name: Some(product.label_name()),
            price: Some(crate::printable_price(&product.retail_price)),
        }
    }

    pub fn is_print(&self) -> bool {
        self.command.as_deref() == Some(PRINT_COMMAND)
    }
}

/// Bridge response body, on success and on failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeMessage {
    pub message: String,
}

impl BridgeMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
