//! Application state snapshot and its persisted form.

use serde::{Deserialize, Deserializer, Serialize};

use tracing::warn;
use unidemy_core::{CartItem, Price, Product, ProductId, Quantity, User};

/// One immutable snapshot of the shopper's session, wishlist, and cart.
///
/// Snapshots are only produced by [`reduce`](crate::reducer::reduce); consumers
/// get them behind an `Arc` and read them through the accessors below.
///
/// Invariants:
/// - the wishlist holds at most one entry per product ID
/// - the cart holds at most one line per product ID, each with at least one unit
/// - both lists keep first-insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub(crate) user: Option<User>,
    pub(crate) wishlist: Vec<Product>,
    pub(crate) cart: Vec<CartItem>,
}

impl AppState {
    /// The signed-in account, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether an account is signed in. Derived from [`AppState::user`].
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Saved listings in the order they were saved.
    #[must_use]
    pub fn wishlist(&self) -> &[Product] {
        &self.wishlist
    }

    /// Cart lines in the order they were first added.
    #[must_use]
    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    /// Whether the listing is on the wishlist.
    #[must_use]
    pub fn is_wishlisted(&self, id: ProductId) -> bool {
        self.wishlist.iter().any(|p| p.id == id)
    }

    /// The cart line for a listing.
    #[must_use]
    pub fn cart_item(&self, id: ProductId) -> Option<&CartItem> {
        self.cart.iter().find(|item| item.id() == id)
    }

    /// Total units across all cart lines (the header badge count).
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of unit price times quantity over the cart.
    #[must_use]
    pub fn cart_subtotal(&self) -> Price {
        self.cart.iter().map(CartItem::line_total).sum()
    }

    /// Sum of per-unit markdowns times quantity over the cart.
    #[must_use]
    pub fn cart_savings(&self) -> Price {
        self.cart
            .iter()
            .filter_map(|item| item.product.markdown().map(|m| m * item.quantity.get()))
            .sum()
    }

    /// Build a snapshot directly from persisted data, bypassing the reducer.
    ///
    /// Duplicate IDs keep their first occurrence so the invariants hold even
    /// for a blob that was edited by hand.
    #[must_use]
    pub fn from_snapshot(persisted: PersistedState) -> Self {
        let mut state = Self {
            user: persisted.user,
            wishlist: Vec::with_capacity(persisted.wishlist.len()),
            cart: Vec::with_capacity(persisted.cart.len()),
        };
        for product in persisted.wishlist {
            if !state.is_wishlisted(product.id) {
                state.wishlist.push(product);
            }
        }
        for item in persisted.cart {
            if state.cart_item(item.id()).is_none() {
                state.cart.push(item);
            }
        }
        state
    }
}

/// The JSON record stored in the durable slot.
///
/// Every field is optional on read; `null` lists read as empty. Stored cart
/// lines with fewer than one unit are dropped rather than failing the record.
/// `isAuthenticated` is written for readers that expect it but is never read
/// back, since it follows from `user`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub wishlist: Vec<Product>,
    #[serde(default, deserialize_with = "stored_cart")]
    pub cart: Vec<CartItem>,
    #[serde(default, skip_deserializing)]
    pub is_authenticated: bool,
}

impl From<&AppState> for PersistedState {
    fn from(state: &AppState) -> Self {
        Self {
            user: state.user.clone(),
            wishlist: state.wishlist.clone(),
            cart: state.cart.clone(),
            is_authenticated: state.is_authenticated(),
        }
    }
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A cart line as stored, before its quantity is checked.
#[derive(Deserialize)]
struct StoredLine {
    #[serde(flatten)]
    product: Product,
    quantity: i64,
}

fn stored_cart<'de, D>(deserializer: D) -> Result<Vec<CartItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let lines: Vec<StoredLine> = nullable_list(deserializer)?;
    Ok(lines
        .into_iter()
        .filter_map(|line| {
            let units =
                u32::try_from(line.quantity.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX);
            match Quantity::new(units) {
                Ok(quantity) => Some(CartItem::new(line.product, quantity)),
                Err(_) => {
                    warn!(
                        id = %line.product.id,
                        quantity = line.quantity,
                        "dropping stored cart line with no units"
                    );
                    None
                }
            }
        })
        .collect())
}
