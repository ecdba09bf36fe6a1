//! Login/logout facade for views that only care about the session.

use unidemy_core::User;

use crate::action::Action;
use crate::store::Store;

/// Session view over a [`Store`].
///
/// Signing out goes through `LOGOUT`, which also empties the wishlist and cart.
#[derive(Debug, Clone)]
pub struct Auth {
    store: Store,
}

impl Auth {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Build from the store provided to the current scope.
    ///
    /// # Panics
    ///
    /// Panics outside of an [`AppProvider`](crate::AppProvider) scope.
    #[must_use]
    pub fn from_context() -> Self {
        Self::new(crate::context::use_app())
    }

    /// The signed-in account, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.store.state().user().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.state().is_authenticated()
    }

    pub fn login(&self, user: User) {
        self.store.dispatch(Action::Login(user));
    }

    pub fn logout(&self) {
        self.store.dispatch(Action::Logout);
    }
}
