//! State transitions the store accepts.
//!
//! Actions serialize in the same `{ "type": ..., "payload": ... }` shape the web
//! client dispatches, so an action log or a message from a view layer written
//! in another language can be fed straight into [`Store::dispatch`](crate::Store::dispatch).

use serde::{Deserialize, Serialize};

use unidemy_core::{CartItem, Product, ProductId, User};

/// A state transition request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Start a session for `User`.
    Login(User),
    /// End the session and drop the wishlist and cart.
    Logout,
    /// Save a listing; ignored if it is already saved.
    AddToWishlist(Product),
    /// Unsave a listing.
    RemoveFromWishlist(ProductId),
    /// Add units to the cart, merging into an existing line.
    AddToCart(CartItem),
    /// Drop a cart line.
    RemoveFromCart(ProductId),
    /// Set the units on an existing cart line. Zero drops the line.
    UpdateCartQuantity { id: ProductId, quantity: u32 },
    /// Empty the cart.
    ClearCart,
    /// Unsave a listing and add it to the cart in one step.
    MoveToCart(CartItem),
    /// Any action kind this build does not know. Always a no-op.
    #[serde(other)]
    Unknown,
}

impl Action {
    /// The wire name of this action kind, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Login(_) => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::AddToWishlist(_) => "ADD_TO_WISHLIST",
            Self::RemoveFromWishlist(_) => "REMOVE_FROM_WISHLIST",
            Self::AddToCart(_) => "ADD_TO_CART",
            Self::RemoveFromCart(_) => "REMOVE_FROM_CART",
            Self::UpdateCartQuantity { .. } => "UPDATE_CART_QUANTITY",
            Self::ClearCart => "CLEAR_CART",
            Self::MoveToCart(_) => "MOVE_TO_CART",
            Self::Unknown => "UNKNOWN",
        }
    }
}
