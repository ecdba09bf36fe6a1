//! The transition function.
//!
//! [`reduce`] is pure and total: every action maps to a fully-defined state and
//! nothing here can fail. When an action changes nothing, the input `Arc` is
//! returned as-is so callers can detect the no-op with [`Arc::ptr_eq`] and skip
//! persistence.

use std::sync::Arc;

use unidemy_core::{CartItem, ProductId, Quantity};

use crate::action::Action;
use crate::state::AppState;

/// Apply `action` to `state`, returning the next snapshot.
#[must_use]
pub fn reduce(state: &Arc<AppState>, action: &Action) -> Arc<AppState> {
    match action {
        Action::Login(user) => Arc::new(AppState {
            user: Some(user.clone()),
            ..AppState::clone(state)
        }),
        Action::Logout => Arc::new(AppState::default()),
        Action::AddToWishlist(product) => {
            if state.is_wishlisted(product.id) {
                return Arc::clone(state);
            }
            let mut next = AppState::clone(state);
            next.wishlist.push(product.clone());
            Arc::new(next)
        }
        Action::RemoveFromWishlist(id) => {
            if !state.is_wishlisted(*id) {
                return Arc::clone(state);
            }
            let mut next = AppState::clone(state);
            next.wishlist.retain(|p| p.id != *id);
            Arc::new(next)
        }
        Action::AddToCart(item) => {
            let mut next = AppState::clone(state);
            add_to_cart(&mut next.cart, item);
            Arc::new(next)
        }
        Action::RemoveFromCart(id) => {
            if state.cart_item(*id).is_none() {
                return Arc::clone(state);
            }
            let mut next = AppState::clone(state);
            next.cart.retain(|line| line.id() != *id);
            Arc::new(next)
        }
        Action::UpdateCartQuantity { id, quantity } => {
            update_quantity(state, *id, *quantity)
        }
        Action::ClearCart => {
            if state.cart.is_empty() {
                return Arc::clone(state);
            }
            Arc::new(AppState {
                cart: Vec::new(),
                ..AppState::clone(state)
            })
        }
        Action::MoveToCart(item) => {
            let mut next = AppState::clone(state);
            next.wishlist.retain(|p| p.id != item.id());
            add_to_cart(&mut next.cart, item);
            Arc::new(next)
        }
        Action::Unknown => Arc::clone(state),
    }
}

/// Merge into the existing line for the same listing, or append a new one.
fn add_to_cart(cart: &mut Vec<CartItem>, item: &CartItem) {
    match cart.iter_mut().find(|line| line.id() == item.id()) {
        Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
        None => cart.push(item.clone()),
    }
}

fn update_quantity(state: &Arc<AppState>, id: ProductId, quantity: u32) -> Arc<AppState> {
    let Some(current) = state.cart_item(id) else {
        return Arc::clone(state);
    };

    match Quantity::new(quantity) {
        Ok(quantity) if quantity == current.quantity => Arc::clone(state),
        Ok(quantity) => {
            let mut next = AppState::clone(state);
            for line in next.cart.iter_mut().filter(|line| line.id() == id) {
                line.quantity = quantity;
            }
            Arc::new(next)
        }
        // A line can't hold zero units; setting zero drops it.
        Err(_) => {
            let mut next = AppState::clone(state);
            next.cart.retain(|line| line.id() != id);
            Arc::new(next)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use unidemy_core::Price;

    use super::*;
    use crate::state::tests::{line, product, user};

    fn run(actions: impl IntoIterator<Item = Action>) -> Arc<AppState> {
        actions
            .into_iter()
            .fold(Arc::new(AppState::default()), |state, action| {
                reduce(&state, &action)
            })
    }

    fn cart_ids(state: &AppState) -> Vec<i64> {
        state.cart().iter().map(|l| l.id().as_i64()).collect()
    }

    fn wishlist_ids(state: &AppState) -> Vec<i64> {
        state.wishlist().iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_login_sets_user_and_authenticates() {
        let state = run([Action::Login(user())]);
        assert!(state.is_authenticated());
        assert_eq!(state.user().unwrap().name, "Maya");
    }

    #[test]
    fn test_logout_clears_session_scoped_data() {
        let state = run([
            Action::Login(user()),
            Action::AddToWishlist(product(1, 100)),
            Action::AddToCart(line(2, 200, 1)),
            Action::Logout,
        ]);
        assert_eq!(*state, AppState::default());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_add_to_wishlist_is_idempotent() {
        let once = run([Action::AddToWishlist(product(1, 100))]);
        let twice = reduce(&once, &Action::AddToWishlist(product(1, 100)));
        assert!(Arc::ptr_eq(&once, &twice));
        assert_eq!(wishlist_ids(&twice), vec![1]);
    }

    #[test]
    fn test_add_to_wishlist_keeps_first_copy() {
        let state = run([
            Action::AddToWishlist(product(1, 100)),
            Action::AddToWishlist(product(1, 5000)),
        ]);
        assert_eq!(state.wishlist()[0].price, Price::from_cents(100));
    }

    #[test]
    fn test_remove_from_wishlist_closes_gap() {
        let state = run([
            Action::AddToWishlist(product(1, 100)),
            Action::AddToWishlist(product(2, 200)),
            Action::AddToWishlist(product(3, 300)),
            Action::RemoveFromWishlist(ProductId::new(2)),
        ]);
        assert_eq!(wishlist_ids(&state), vec![1, 3]);
    }

    #[test]
    fn test_merge_on_re_add() {
        let state = run([
            Action::AddToCart(line(1, 100, 2)),
            Action::AddToCart(line(1, 100, 3)),
        ]);
        assert_eq!(state.cart().len(), 1);
        assert_eq!(state.cart()[0].quantity.get(), 5);
    }

    #[test]
    fn test_merge_keeps_line_position() {
        let state = run([
            Action::AddToCart(line(1, 100, 1)),
            Action::AddToCart(line(2, 200, 1)),
            Action::AddToCart(line(1, 100, 1)),
        ]);
        assert_eq!(cart_ids(&state), vec![1, 2]);
    }

    #[test]
    fn test_no_op_on_missing_id() {
        let empty = Arc::new(AppState::default());
        let after = reduce(&empty, &Action::RemoveFromCart(ProductId::new(999)));
        assert!(Arc::ptr_eq(&empty, &after));

        let after = reduce(&empty, &Action::RemoveFromWishlist(ProductId::new(999)));
        assert!(Arc::ptr_eq(&empty, &after));

        let after = reduce(
            &empty,
            &Action::UpdateCartQuantity {
                id: ProductId::new(999),
                quantity: 4,
            },
        );
        assert!(Arc::ptr_eq(&empty, &after));
    }

    #[test]
    fn test_update_cart_quantity_sets_value() {
        let state = run([
            Action::AddToCart(line(1, 100, 2)),
            Action::UpdateCartQuantity {
                id: ProductId::new(1),
                quantity: 9,
            },
        ]);
        assert_eq!(state.cart()[0].quantity.get(), 9);
    }

    #[test]
    fn test_update_cart_quantity_to_zero_drops_line() {
        let state = run([
            Action::AddToCart(line(1, 100, 2)),
            Action::AddToCart(line(2, 100, 1)),
            Action::UpdateCartQuantity {
                id: ProductId::new(1),
                quantity: 0,
            },
        ]);
        assert_eq!(cart_ids(&state), vec![2]);
    }

    #[test]
    fn test_clear_cart_leaves_wishlist() {
        let state = run([
            Action::AddToWishlist(product(1, 100)),
            Action::AddToCart(line(2, 200, 1)),
            Action::ClearCart,
        ]);
        assert!(state.cart().is_empty());
        assert_eq!(wishlist_ids(&state), vec![1]);
    }

    #[test]
    fn test_move_to_cart() {
        let state = run([
            Action::AddToWishlist(product(1, 100)),
            Action::MoveToCart(line(1, 100, 1)),
        ]);
        assert!(state.wishlist().is_empty());
        assert_eq!(cart_ids(&state), vec![1]);
        assert_eq!(state.cart()[0].quantity.get(), 1);
    }

    #[test]
    fn test_move_to_cart_appends_and_merges() {
        let state = run([
            Action::AddToCart(line(1, 100, 1)),
            Action::AddToCart(line(2, 200, 1)),
            Action::AddToWishlist(product(3, 300)),
            Action::AddToWishlist(product(2, 200)),
            Action::MoveToCart(line(3, 300, 2)),
            Action::MoveToCart(line(2, 200, 4)),
        ]);
        assert!(state.wishlist().is_empty());
        assert_eq!(cart_ids(&state), vec![1, 2, 3]);
        assert_eq!(state.cart_item(ProductId::new(2)).unwrap().quantity.get(), 5);
        assert_eq!(state.cart_item(ProductId::new(3)).unwrap().quantity.get(), 2);
    }

    #[test]
    fn test_unknown_action_returns_same_snapshot() {
        let state = run([Action::AddToCart(line(1, 100, 1))]);
        let after = reduce(&state, &Action::Unknown);
        assert!(Arc::ptr_eq(&state, &after));
    }

    #[test]
    fn test_cart_quantities_follow_adds_and_updates() {
        // Deterministic pseudo-random action sequence over a small ID space,
        // checked against a map of expected quantities per ID.
        let mut seed: u32 = 0x2545_f491;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            seed
        };

        let mut state = Arc::new(AppState::default());
        let mut expected: BTreeMap<i64, u32> = BTreeMap::new();
        for _ in 0..500 {
            let id = i64::from(next() % 5);
            let qty = next() % 4;
            let action = match next() % 6 {
                0 => {
                    *expected.entry(id).or_insert(0) += qty.max(1);
                    Action::AddToCart(line(id, 100, qty.max(1)))
                }
                1 => {
                    expected.remove(&id);
                    Action::RemoveFromCart(ProductId::new(id))
                }
                2 => {
                    if qty == 0 {
                        expected.remove(&id);
                    } else if let Some(current) = expected.get_mut(&id) {
                        *current = qty;
                    }
                    Action::UpdateCartQuantity {
                        id: ProductId::new(id),
                        quantity: qty,
                    }
                }
                3 => {
                    *expected.entry(id).or_insert(0) += qty.max(1);
                    Action::MoveToCart(line(id, 100, qty.max(1)))
                }
                4 => Action::AddToWishlist(product(id, 100)),
                _ => Action::RemoveFromWishlist(ProductId::new(id)),
            };
            state = reduce(&state, &action);

            let actual: BTreeMap<i64, u32> = state
                .cart()
                .iter()
                .map(|l| (l.id().as_i64(), l.quantity.get()))
                .collect();
            assert_eq!(actual.len(), state.cart().len(), "duplicate cart ids");
            assert_eq!(actual, expected, "after {}", action.kind());

            let mut wl = wishlist_ids(&state);
            wl.sort_unstable();
            wl.dedup();
            assert_eq!(wl.len(), state.wishlist().len());
        }
    }
}
