//! Integration tests for the Unidemy storefront state.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p unidemy-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `actions` - action semantics observed through [`Store`]
//! - `persistence` - the durable slot across store instances
//!
//! This library only holds fixtures shared by the files under `tests/`.

use std::path::Path;

use unidemy_core::{CartItem, Email, Price, Product, ProductId, Quantity, Seller, User, UserId};
use unidemy_storefront::{FileStorage, RehydrateMode, Store, StoreConfig};

/// A listing with a price in cents.
#[must_use]
pub fn product(id: i64, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Listing {id}"),
        price: Price::from_cents(cents),
        original_price: None,
        image: format!("/placeholder.svg?id={id}"),
        category: "moving-out".to_string(),
        condition: "Good".to_string(),
        location: "North Dorms".to_string(),
        time_ago: "2 hours ago".to_string(),
        seller: Seller {
            name: "Priya".to_string(),
            rating: 4.9,
            verified: true,
        },
        description: None,
        specifications: None,
    }
}

/// A cart line.
///
/// # Panics
///
/// Panics if `quantity` is zero.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn line(id: i64, cents: i64, quantity: u32) -> CartItem {
    CartItem::new(product(id, cents), Quantity::new(quantity).unwrap())
}

/// The test shopper.
///
/// # Panics
///
/// Never; the address is a valid literal.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn shopper() -> User {
    User::new(
        UserId::new(42),
        "Sam Rivera",
        Email::parse("sam@unidemy.test").unwrap(),
    )
}

/// A store persisting into `<dir>/unidemy-state.json`.
pub fn file_store(dir: &Path, rehydrate: RehydrateMode) -> Store {
    let config = StoreConfig::default()
        .with_data_dir(dir)
        .with_rehydrate(rehydrate);
    Store::new(FileStorage::new(&config.data_dir), &config)
}

/// Write a raw blob where [`file_store`] will look for it.
///
/// # Panics
///
/// Panics if the file can't be written.
#[allow(clippy::unwrap_used)]
pub fn write_blob(dir: &Path, blob: &str) {
    std::fs::write(dir.join("unidemy-state.json"), blob).unwrap();
}

/// Read the raw blob [`file_store`] writes, if any.
#[must_use]
pub fn read_blob(dir: &Path) -> Option<serde_json::Value> {
    let text = std::fs::read_to_string(dir.join("unidemy-state.json")).ok()?;
    serde_json::from_str(&text).ok()
}
