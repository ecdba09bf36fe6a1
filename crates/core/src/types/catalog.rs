//! Catalog records: listings, sellers, categories, and cart lines.
//!
//! The catalog is owned by whoever renders it. The state container only keeps
//! copies of [`Product`] values handed to it through dispatched actions and
//! never edits their fields.
//!
//! Field names serialize in camelCase (`originalPrice`, `timeAgo`) so records
//! round-trip through the JSON blob the web client persists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::quantity::Quantity;

/// Seller summary shown on a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub name: String,
    /// Average rating out of 5.
    pub rating: f64,
    pub verified: bool,
}

/// A marketplace listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Price before the seller's markdown, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Image reference (URL or asset path).
    pub image: String,
    pub category: String,
    pub condition: String,
    pub location: String,
    /// Age of the listing as a display string, e.g. "2 hours ago".
    pub time_ago: String,
    pub seller: Seller,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, String>>,
}

impl Product {
    /// Markdown per unit, when the listing carries an original price above
    /// the current one.
    #[must_use]
    pub fn markdown(&self) -> Option<Price> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(|original| original - self.price)
    }
}

/// A cart line: a listing plus the number of units.
///
/// Serializes flat (`{ ...product, "quantity": 2 }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: Quantity,
}

impl CartItem {
    /// Create a cart line.
    #[must_use]
    pub const fn new(product: Product, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    /// The listing ID this line is keyed by.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity.get()
    }
}

/// A browsable catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub slug: String,
    pub name: String,
    pub description: String,
    /// Listing count as displayed, e.g. "1.2k".
    pub count: String,
    pub href: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn listing_json() -> serde_json::Value {
        json!({
            "id": 12,
            "title": "Mini fridge",
            "price": 80,
            "originalPrice": 120,
            "image": "/fridge.jpg",
            "category": "appliances",
            "condition": "Good",
            "location": "North Campus",
            "timeAgo": "3 days ago",
            "seller": { "name": "Ravi", "rating": 4.6, "verified": true }
        })
    }

    #[test]
    fn test_product_reads_web_client_shape() {
        let product: Product = serde_json::from_value(listing_json()).unwrap();
        assert_eq!(product.id, ProductId::new(12));
        assert_eq!(product.original_price, Some(Price::from_cents(12_000)));
        assert!(product.description.is_none());
        assert_eq!(product.markdown(), Some(Price::from_cents(4000)));
    }

    #[test]
    fn test_markdown_ignores_higher_current_price() {
        let mut product: Product = serde_json::from_value(listing_json()).unwrap();
        product.original_price = Some(Price::from_cents(5000));
        assert_eq!(product.markdown(), None);
    }

    #[test]
    fn test_cart_item_is_flat() {
        let mut value = listing_json();
        value["quantity"] = json!(2);

        let item: CartItem = serde_json::from_value(value).unwrap();
        assert_eq!(item.id(), ProductId::new(12));
        assert_eq!(item.quantity.get(), 2);
        assert_eq!(item.line_total(), Price::from_cents(16_000));

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["quantity"], json!(2));
        assert_eq!(out["timeAgo"], json!("3 days ago"));
        assert!(out.get("product").is_none());
    }
}
