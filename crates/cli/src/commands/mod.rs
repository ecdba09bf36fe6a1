//! Command implementations.
//!
//! Each command works against a [`Store`](unidemy_storefront::Store) handed in
//! by `main`, so the same functions run against a file-backed slot in the
//! binary and an in-memory one in tests.

pub mod cart;
pub mod catalog;
pub mod session;
pub mod state;
pub mod wishlist;

use thiserror::Error;
use unidemy_core::{EmailError, ProductId, QuantityError};
use unidemy_storefront::{ConfigError, StoreError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The bundled catalog failed to parse.
    #[error("Catalog error: {0}")]
    Catalog(#[source] serde_json::Error),

    /// No listing with this ID in the catalog.
    #[error("No listing with id {0}")]
    UnknownProduct(ProductId),

    /// The listing is not in the cart.
    #[error("Listing {0} is not in the cart")]
    NotInCart(ProductId),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    /// Reading or clearing the persisted state failed.
    #[error("State error: {0}")]
    Store(#[from] StoreError),

    /// JSON output could not be rendered.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}
