//! The bundled listing catalog and the `catalog` commands.
//!
//! The catalog is static, read-only data compiled into the binary. Commands
//! look listings up here and hand copies to the store.

use serde::Deserialize;
use unidemy_core::{Category, Product, ProductId};

use super::CommandError;

const BUNDLED: &str = include_str!("../../data/catalog.json");

/// Listings and categories available to the shopper.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl Catalog {
    /// Parse the catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Catalog` if the bundled JSON is malformed.
    pub fn bundled() -> Result<Self, CommandError> {
        serde_json::from_str(BUNDLED).map_err(CommandError::Catalog)
    }

    /// Look up a listing.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::UnknownProduct` if no listing has this ID.
    pub fn product(&self, id: ProductId) -> Result<&Product, CommandError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or(CommandError::UnknownProduct(id))
    }

    /// Listings in a category, or all listings when `category` is `None`.
    pub fn products_in<'a>(&'a self, category: Option<&'a str>) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |p| category.is_none_or(|slug| p.category == slug))
    }
}

/// Print listings, optionally restricted to one category slug.
#[allow(clippy::print_stdout)]
pub fn products(catalog: &Catalog, category: Option<&str>) {
    let mut shown = 0usize;
    for product in catalog.products_in(category) {
        let markdown = product
            .original_price
            .filter(|original| *original > product.price)
            .map(|original| format!(" (was {original})"))
            .unwrap_or_default();
        println!(
            "{:>4}  {:<40} {:>9}{}  [{}] {} - {}",
            product.id,
            product.title,
            product.price.to_string(),
            markdown,
            product.condition,
            product.location,
            product.time_ago,
        );
        shown += 1;
    }
    tracing::info!(shown, category = category.unwrap_or("all"), "Listed products");
}

/// Print categories.
#[allow(clippy::print_stdout)]
pub fn categories(catalog: &Catalog) {
    for category in &catalog.categories {
        println!(
            "{:<18} {:<20} {:>6}  {}",
            category.slug, category.name, category.count, category.description
        );
    }
}
