//! Core data models for the catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog product.
///
/// `is_favorite` is never part of the remote payload; it is reconciled locally
/// from the persisted favorite-identity set after every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "product_name")]
    pub name: String,
    pub product_type: String,
    pub price: f64,
    pub tax: f64,
    pub image: String,
    #[serde(skip)]
    pub is_favorite: bool,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        product_type: impl Into<String>,
        price: f64,
        tax: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            product_type: product_type.into(),
            price,
            tax,
            image: image.into(),
            is_favorite: false,
        }
    }

    /// Identity used for lookup and deduplication.
    ///
    /// Name and type concatenated, with no uniqueness enforcement: two
    /// distinct items sharing name and type are indistinguishable. Known
    /// behavior, kept as-is.
    pub fn id(&self) -> ProductId {
        ProductId(format!("{}{}", self.name, self.product_type))
    }

    /// Key/value pairs for the form-encoded submission body.
    ///
    /// The image is not uploaded.
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("product_name", self.name.clone()),
            ("product_type", self.product_type.clone()),
            ("price", self.price.to_string()),
            ("tax", self.tax.to_string()),
        ]
    }
}

/// Product identity: the `name + type` concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product persisted while offline, awaiting push.
///
/// Carries the fields the durable store schema requires, including the
/// favorite flag the wire schema lacks and the creation timestamp used to
/// restore enqueue order after a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineRecord {
    pub product_name: String,
    pub product_type: String,
    pub price: f64,
    pub tax: f64,
    pub image: String,
    pub is_favorite: bool,
    pub timestamp: DateTime<Utc>,
}

impl OfflineRecord {
    pub fn new(product: Product, timestamp: DateTime<Utc>) -> Self {
        Self {
            product_name: product.name,
            product_type: product.product_type,
            price: product.price,
            tax: product.tax,
            image: product.image,
            is_favorite: product.is_favorite,
            timestamp,
        }
    }

    pub fn product_id(&self) -> ProductId {
        ProductId(format!("{}{}", self.product_name, self.product_type))
    }

    pub fn to_product(&self) -> Product {
        Product {
            name: self.product_name.clone(),
            product_type: self.product_type.clone(),
            price: self.price,
            tax: self.tax,
            image: self.image.clone(),
            is_favorite: self.is_favorite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_name_type_concatenation() {
        let product = Product::new("Pen", "Stationery", 10.0, 5.0, "");
        assert_eq!(product.id(), ProductId("PenStationery".to_string()));
    }

    #[test]
    fn test_identity_collision_preserved() {
        // Two distinct items sharing name and type share an identity.
        let a = Product::new("Pen", "Stationery", 10.0, 5.0, "a.png");
        let b = Product::new("Pen", "Stationery", 99.0, 18.0, "b.png");
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_wire_decode() {
        let json = r#"{
            "product_name": "Pen",
            "product_type": "Stationery",
            "price": 10.0,
            "tax": 5.0,
            "image": ""
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Pen");
        assert_eq!(product.product_type, "Stationery");
        assert_eq!(product.price, 10.0);
        assert_eq!(product.tax, 5.0);
        assert_eq!(product.image, "");
        // Never trusted from the wire.
        assert!(!product.is_favorite);
    }

    #[test]
    fn test_wire_decode_missing_field_fails() {
        let json = r#"{"product_name": "Pen", "price": 10.0}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_wire_decode_mistyped_field_fails() {
        let json = r#"{
            "product_name": "Pen",
            "product_type": "Stationery",
            "price": "ten",
            "tax": 5.0,
            "image": ""
        }"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_form_params() {
        let product = Product::new("Pen", "Stationery", 10.0, 5.0, "pen.png");
        let params = product.form_params();

        assert_eq!(params.len(), 4);
        assert_eq!(params[0], ("product_name", "Pen".to_string()));
        assert_eq!(params[1], ("product_type", "Stationery".to_string()));
        assert_eq!(params[2], ("price", "10".to_string()));
        assert_eq!(params[3], ("tax", "5".to_string()));
    }

    #[test]
    fn test_offline_record_roundtrip() {
        let mut product = Product::new("Pen", "Stationery", 10.0, 5.0, "pen.png");
        product.is_favorite = true;

        let record = OfflineRecord::new(product.clone(), Utc::now());
        assert_eq!(record.product_id(), product.id());
        assert_eq!(record.to_product(), product);
    }
}
