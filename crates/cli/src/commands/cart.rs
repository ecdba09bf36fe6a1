//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! unidemy cart add 6 -q 2
//! unidemy cart update 6 1
//! unidemy cart move 3          # from wishlist to cart
//! unidemy cart show
//! unidemy cart remove 6
//! unidemy cart clear
//! ```

use unidemy_core::{CartItem, ProductId, Quantity};
use unidemy_storefront::{Action, Store};

use super::CommandError;
use super::catalog::Catalog;

fn cart_item(catalog: &Catalog, id: ProductId, quantity: u32) -> Result<CartItem, CommandError> {
    let product = catalog.product(id)?;
    Ok(CartItem::new(product.clone(), Quantity::new(quantity)?))
}

/// Add units of a catalog listing to the cart.
///
/// # Errors
///
/// Returns an error if the listing is unknown or `quantity` is zero.
pub fn add(store: &Store, catalog: &Catalog, id: ProductId, quantity: u32) -> Result<(), CommandError> {
    let item = cart_item(catalog, id, quantity)?;
    let title = item.product.title.clone();
    store.dispatch(Action::AddToCart(item));
    log_line(store, id, &title);
    Ok(())
}

/// Move a listing from the wishlist into the cart.
///
/// # Errors
///
/// Returns an error if the listing is unknown or `quantity` is zero.
pub fn move_to_cart(
    store: &Store,
    catalog: &Catalog,
    id: ProductId,
    quantity: u32,
) -> Result<(), CommandError> {
    let item = cart_item(catalog, id, quantity)?;
    let title = item.product.title.clone();
    if !store.state().is_wishlisted(id) {
        tracing::info!("{title} was not on your wishlist; adding it to the cart");
    }
    store.dispatch(Action::MoveToCart(item));
    log_line(store, id, &title);
    Ok(())
}

/// Set the units on a cart line. Zero removes the line.
///
/// # Errors
///
/// Returns `CommandError::NotInCart` if the listing has no cart line.
pub fn update(store: &Store, id: ProductId, quantity: u32) -> Result<(), CommandError> {
    if store.state().cart_item(id).is_none() {
        return Err(CommandError::NotInCart(id));
    }
    store.dispatch(Action::UpdateCartQuantity { id, quantity });
    if quantity == 0 {
        tracing::info!("Removed listing {id} from your cart");
    } else {
        tracing::info!("Listing {id} now has quantity {quantity}");
    }
    Ok(())
}

/// Remove a cart line.
///
/// # Errors
///
/// Returns `CommandError::NotInCart` if the listing has no cart line.
pub fn remove(store: &Store, id: ProductId) -> Result<(), CommandError> {
    if store.state().cart_item(id).is_none() {
        return Err(CommandError::NotInCart(id));
    }
    store.dispatch(Action::RemoveFromCart(id));
    tracing::info!("Removed listing {id} from your cart");
    Ok(())
}

/// Empty the cart.
pub fn clear(store: &Store) {
    store.dispatch(Action::ClearCart);
    tracing::info!("Cart cleared");
}

/// Print cart lines and totals.
#[allow(clippy::print_stdout)]
pub fn show(store: &Store) {
    let state = store.state();
    if state.cart().is_empty() {
        println!("Your cart is empty");
        return;
    }

    for line in state.cart() {
        println!(
            "{:>4}  {:<40} {:>3} x {:>9} = {:>10}",
            line.id(),
            line.product.title,
            line.quantity,
            line.product.price.to_string(),
            line.line_total().to_string(),
        );
    }
    println!();
    println!("Items:     {}", state.cart_item_count());
    println!("Subtotal:  {}", state.cart_subtotal());
    let savings = state.cart_savings();
    if savings > unidemy_core::Price::ZERO {
        println!("You save:  {savings}");
    }
}

fn log_line(store: &Store, id: ProductId, title: &str) {
    if let Some(line) = store.state().cart_item(id) {
        tracing::info!("{title}: {} in cart", line.quantity);
    }
}
