//! Wishlist commands.
//!
//! # Usage
//!
//! ```bash
//! unidemy wishlist add 3
//! unidemy wishlist list
//! unidemy wishlist remove 3
//! ```

use unidemy_core::ProductId;
use unidemy_storefront::{Action, Store};

use super::CommandError;
use super::catalog::Catalog;

/// Save a catalog listing.
///
/// # Errors
///
/// Returns `CommandError::UnknownProduct` if the listing isn't in the catalog.
pub fn add(store: &Store, catalog: &Catalog, id: ProductId) -> Result<(), CommandError> {
    let product = catalog.product(id)?;
    if store.state().is_wishlisted(id) {
        tracing::info!("{} is already on your wishlist", product.title);
        return Ok(());
    }
    store.dispatch(Action::AddToWishlist(product.clone()));
    tracing::info!("Saved {}", product.title);
    Ok(())
}

/// Unsave a listing.
pub fn remove(store: &Store, id: ProductId) {
    if !store.state().is_wishlisted(id) {
        tracing::info!("Listing {id} is not on your wishlist");
        return;
    }
    store.dispatch(Action::RemoveFromWishlist(id));
    tracing::info!("Removed listing {id} from your wishlist");
}

/// Print saved listings.
#[allow(clippy::print_stdout)]
pub fn list(store: &Store) {
    let state = store.state();
    if !state.is_authenticated() {
        tracing::info!("Sign in to keep your wishlist across sessions");
    }
    if state.wishlist().is_empty() {
        println!("Your wishlist is empty");
        return;
    }
    for product in state.wishlist() {
        println!(
            "{:>4}  {:<40} {:>9}  {}",
            product.id,
            product.title,
            product.price.to_string(),
            product.location
        );
    }
}
