//! Product Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product record as returned by the product service or read from the
/// catalog export
///
/// Every field is an opaque display string; only `retail_price` gets
/// normalised (see [`crate::format_price`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Lookup key
    pub barcode: String,
    pub product_name: String,
    pub brand_name: Option<String>,
    /// Free-form, e.g. "500g"
    pub product_weight: String,
    /// Free-form, e.g. "12,95 kr."
    pub retail_price: String,
    pub image_url: Option<String>,
}

impl Product {
    /// Name and weight as shown on the label, e.g. "Coffee 500g"
    pub fn label_name(&self) -> String {
        format!("{} {}", self.product_name, self.product_weight)
            .trim()
            .to_string()
    }

    /// Display price with currency suffix
    pub fn display_price(&self) -> String {
        crate::format_price(&self.retail_price)
    }
}

/// Create product payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub barcode: String,
    pub product_brand: String,
    pub product_name: String,
    pub product_weight: String,
    pub retail_price: String,
}

/// Identifier assigned by the product service
///
/// The service has answered with both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Response of a successful product creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreated {
    pub product_id: ProductId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_service_payload() {
        let json = r#"[{
            "barcode": "5701234567890",
            "productName": "Kaffe",
            "brandName": "Peter Larsen",
            "productWeight": "400g",
            "retailPrice": "54,95",
            "imageUrl": "https://img.example/kaffe.png"
        }]"#;

        let products: Vec<Product> = serde_json::from_str(json).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "Kaffe");
        assert_eq!(products[0].brand_name.as_deref(), Some("Peter Larsen"));
        assert_eq!(products[0].display_price(), "54.95 DKK");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let product: Product = serde_json::from_str(r#"{"barcode":"1"}"#).unwrap();
        assert_eq!(product.barcode, "1");
        assert!(product.product_name.is_empty());
        assert!(product.brand_name.is_none());
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_label_name() {
        let product = Product {
            product_name: "Havregryn".into(),
            product_weight: "1kg".into(),
            ..Default::default()
        };
        assert_eq!(product.label_name(), "Havregryn 1kg");
    }

    #[test]
    fn test_product_create_wire_names() {
        let body = ProductCreate {
            barcode: "42".into(),
            product_brand: "Brand".into(),
            product_name: "Name".into(),
            product_weight: "1l".into(),
            retail_price: "10,00".into(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["productBrand"], "Brand");
        assert_eq!(value["retailPrice"], "10,00");
    }

    #[test]
    fn test_product_id_number_or_text() {
        let n: ProductCreated = serde_json::from_str(r#"{"productId":17}"#).unwrap();
        let s: ProductCreated = serde_json::from_str(r#"{"productId":"abc"}"#).unwrap();
        assert_eq!(n.product_id.to_string(), "17");
        assert_eq!(s.product_id.to_string(), "abc");
    }
}
