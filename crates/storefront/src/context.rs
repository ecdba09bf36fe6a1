//! Scoped store lookup for view code.
//!
//! The host builds one [`Store`] at startup and enters an [`AppProvider`] scope
//! around the code that renders views. Inside that scope any view can call
//! [`use_app`] to get the store without having it threaded through every
//! function signature.
//!
//! Scopes are per thread and nest: the innermost live [`ProviderGuard`] wins,
//! and dropping it restores the enclosing one.
//!
//! ```
//! use unidemy_storefront::{AppProvider, Store, use_app};
//!
//! let _provider = AppProvider::enter(Store::in_memory());
//! assert!(!use_app().state().is_authenticated());
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;

use crate::error::StoreError;
use crate::store::Store;

thread_local! {
    static PROVIDERS: RefCell<Vec<Store>> = const { RefCell::new(Vec::new()) };
}

/// Entry point for providing a store to the current thread.
#[derive(Debug)]
pub struct AppProvider;

impl AppProvider {
    /// Make `store` the current store on this thread until the guard drops.
    #[must_use = "the store is only provided while the guard is alive"]
    pub fn enter(store: Store) -> ProviderGuard {
        let depth = PROVIDERS.with(|providers| {
            let mut providers = providers.borrow_mut();
            providers.push(store);
            providers.len() - 1
        });
        ProviderGuard {
            depth,
            _not_send: PhantomData,
        }
    }

    /// Run `f` with `store` provided, returning its result.
    pub fn scope<R>(store: Store, f: impl FnOnce() -> R) -> R {
        let _guard = Self::enter(store);
        f()
    }
}

/// Keeps a store provided on the current thread. Not `Send`: it must drop on
/// the thread that created it.
///
/// Dropping a guard also ends every scope entered after it.
#[derive(Debug)]
pub struct ProviderGuard {
    /// Stack length before this guard's store was pushed
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ProviderGuard {
    fn drop(&mut self) {
        PROVIDERS.with(|providers| {
            providers.borrow_mut().truncate(self.depth);
        });
    }
}

/// The store provided by the innermost live scope on this thread.
///
/// # Errors
///
/// Returns [`StoreError::NoProvider`] outside of any [`AppProvider`] scope.
pub fn try_use_app() -> Result<Store, StoreError> {
    PROVIDERS.with(|providers| providers.borrow().last().cloned().ok_or(StoreError::NoProvider))
}

/// The store provided by the innermost live scope on this thread.
///
/// # Panics
///
/// Panics outside of any [`AppProvider`] scope. That is a wiring bug in the
/// host, not a runtime condition to recover from; use [`try_use_app`] where a
/// missing provider is expected.
#[must_use]
pub fn use_app() -> Store {
    match try_use_app() {
        Ok(store) => store,
        Err(e) => panic!("{e}"),
    }
}
