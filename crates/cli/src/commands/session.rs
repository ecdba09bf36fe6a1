//! Session commands: `login`, `logout`, `whoami`.
//!
//! # Usage
//!
//! ```bash
//! unidemy login --id 1 --name "Maya Chen" --email maya@unidemy.test
//! unidemy whoami
//! unidemy logout
//! ```

use unidemy_core::{Email, User, UserId};
use unidemy_storefront::{Auth, Store};

use super::CommandError;

/// Sign in as the given account.
///
/// # Errors
///
/// Returns `CommandError::InvalidEmail` if the email doesn't parse.
pub fn login(store: &Store, id: i64, name: &str, email: &str) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let user = User::new(UserId::new(id), name.trim(), email);

    tracing::info!("Signed in as {} <{}>", user.name, user.email);
    Auth::new(store.clone()).login(user);
    Ok(())
}

/// Sign out. This also empties the wishlist and cart.
pub fn logout(store: &Store) {
    let auth = Auth::new(store.clone());
    let was_signed_in = auth.is_authenticated();
    auth.logout();
    if was_signed_in {
        tracing::info!("Signed out; wishlist and cart cleared");
    } else {
        tracing::info!("Not signed in; wishlist and cart cleared");
    }
}

/// Show the signed-in account.
#[allow(clippy::print_stdout)]
pub fn whoami(store: &Store) {
    match Auth::new(store.clone()).user() {
        Some(user) => println!("{} <{}> (id {})", user.name, user.email, user.id),
        None => println!("Not signed in"),
    }
}
