//! The state holder.
//!
//! A [`Store`] is created once per application session. Creation reads the
//! durable slot and rehydrates; after that every [`Store::dispatch`] runs the
//! reducer, swaps the snapshot in, overwrites the slot, and notifies
//! subscribers, all before returning.
//!
//! Dispatch never fails. A slot that can't be written is logged and reported
//! through [`Store::last_persistence_error`]; the in-memory state stays
//! authoritative.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::action::Action;
use crate::config::{RehydrateMode, StoreConfig};
use crate::error::Result;
use crate::reducer::reduce;
use crate::state::{AppState, PersistedState};
use crate::storage::{KeyValueStorage, MemoryStorage};

type Listener = Arc<dyn Fn(&AppState) + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Shared handle to the application state.
///
/// Cheaply cloneable; clones observe and dispatch against the same state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    storage: Box<dyn KeyValueStorage>,
    key: String,
    state: Mutex<Arc<AppState>>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
    last_persistence_error: Mutex<Option<String>>,
}

impl Store {
    /// Create a store over `storage` and rehydrate from it.
    pub fn new(storage: impl KeyValueStorage + 'static, config: &StoreConfig) -> Self {
        let store = Self {
            inner: Arc::new(StoreInner {
                storage: Box::new(storage),
                key: config.storage_key.clone(),
                state: Mutex::new(Arc::new(AppState::default())),
                listeners: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
                last_persistence_error: Mutex::new(None),
            }),
        };
        store.rehydrate(config.rehydrate);
        store
    }

    /// Create a store with nothing persisted and nowhere durable to persist to.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new(), &StoreConfig::default())
    }

    /// The current snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&*self.lock_state())
    }

    /// The key of the durable slot this store writes.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.inner.key
    }

    /// Apply `action` and persist the result.
    ///
    /// No-op transitions leave the slot untouched and do not notify subscribers.
    pub fn dispatch(&self, action: Action) {
        debug!(action = action.kind(), "dispatch");

        let next = {
            let mut current = self.lock_state();
            let next = reduce(&current, &action);
            if Arc::ptr_eq(&*current, &next) {
                return;
            }
            *current = Arc::clone(&next);
            // Persist under the lock so slot writes land in dispatch order.
            self.persist(&next);
            next
        };

        self.notify(&next);
    }

    /// Register a callback invoked with every new snapshot.
    pub fn subscribe(&self, listener: impl Fn(&AppState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    /// Remove a callback. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// The message of the most recent failed slot write, cleared by the next
    /// successful one.
    #[must_use]
    pub fn last_persistence_error(&self) -> Option<String> {
        self.inner
            .last_persistence_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Read and parse the blob currently in the slot.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the slot can't be read and
    /// `StoreError::Corrupt` if the blob isn't a valid persisted state.
    pub fn read_persisted(&self) -> Result<Option<PersistedState>> {
        let Some(blob) = self.inner.storage.get_item(&self.inner.key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&blob)?))
    }

    /// Clear the slot and return to the default state.
    ///
    /// The in-memory state is reset even if removing the slot fails.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the slot can't be removed.
    pub fn reset(&self) -> Result<()> {
        let next = Arc::new(AppState::default());
        {
            let mut current = self.lock_state();
            *current = Arc::clone(&next);
        }
        let removed = self.inner.storage.remove_item(&self.inner.key);
        self.notify(&next);
        removed?;
        info!(key = %self.inner.key, "persisted state cleared");
        Ok(())
    }

    fn rehydrate(&self, mode: RehydrateMode) {
        let persisted = match self.read_persisted() {
            Ok(Some(persisted)) => persisted,
            Ok(None) => {
                debug!(key = %self.inner.key, "no persisted state");
                return;
            }
            Err(e) => {
                warn!(key = %self.inner.key, error = %e, "ignoring persisted state, starting empty");
                return;
            }
        };

        match mode {
            RehydrateMode::Replay => {
                if let Some(user) = persisted.user {
                    self.dispatch(Action::Login(user));
                }
                for product in persisted.wishlist {
                    self.dispatch(Action::AddToWishlist(product));
                }
                for item in persisted.cart {
                    self.dispatch(Action::AddToCart(item));
                }
            }
            RehydrateMode::Snapshot => {
                let next = Arc::new(AppState::from_snapshot(persisted));
                {
                    let mut current = self.lock_state();
                    *current = Arc::clone(&next);
                    self.persist(&next);
                }
                self.notify(&next);
            }
        }

        let state = self.state();
        info!(
            %mode,
            authenticated = state.is_authenticated(),
            wishlist = state.wishlist().len(),
            cart = state.cart().len(),
            "rehydrated persisted state"
        );
    }

    fn persist(&self, state: &AppState) {
        let result = serde_json::to_string(&PersistedState::from(state))
            .map_err(|e| e.to_string())
            .and_then(|blob| {
                self.inner
                    .storage
                    .set_item(&self.inner.key, &blob)
                    .map_err(|e| e.to_string())
            });

        let mut last_error = self
            .inner
            .last_persistence_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match result {
            Ok(()) => *last_error = None,
            Err(e) => {
                warn!(key = %self.inner.key, error = %e, "failed to persist state");
                *last_error = Some(e);
            }
        }
    }

    fn notify(&self, state: &AppState) {
        // Snapshot the list so listeners may subscribe, unsubscribe, or read
        // the store without deadlocking.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(state);
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, Arc<AppState>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("key", &self.inner.key)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use serde_json::json;
    use unidemy_core::ProductId;

    use super::*;
    use crate::error::{StorageError, StoreError};
    use crate::state::tests::{line, product, user};

    const KEY: &str = "unidemy-state";

    /// Counts writes and can be told to reject them.
    #[derive(Clone, Default)]
    struct Recording {
        inner: MemoryStorage,
        writes: Arc<AtomicUsize>,
        reject: Arc<std::sync::atomic::AtomicBool>,
    }

    impl KeyValueStorage for Recording {
        fn get_item(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            if self.reject.load(Ordering::SeqCst) {
                return Err(StorageError::Rejected("quota exceeded".to_string()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> std::result::Result<(), StorageError> {
            self.inner.remove_item(key)
        }
    }

    fn stored(storage: &MemoryStorage) -> serde_json::Value {
        serde_json::from_str(&storage.get_item(KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_absent_slot_starts_empty_without_writing() {
        let storage = Recording::default();
        let store = Store::new(storage.clone(), &StoreConfig::default());

        assert_eq!(*store.state(), AppState::default());
        assert_eq!(storage.writes.load(Ordering::SeqCst), 0);
        assert!(storage.inner.get_item(KEY).unwrap().is_none());
    }

    #[test]
    fn test_every_change_is_written_to_the_slot() {
        let storage = MemoryStorage::new();
        let store = Store::new(storage.clone(), &StoreConfig::default());

        store.dispatch(Action::Login(user()));
        store.dispatch(Action::AddToCart(line(7, 1500, 2)));

        let blob = stored(&storage);
        assert_eq!(blob["user"]["name"], json!("Maya"));
        assert_eq!(blob["isAuthenticated"], json!(true));
        assert_eq!(blob["cart"][0]["id"], json!(7));
        assert_eq!(blob["cart"][0]["quantity"], json!(2));
        assert_eq!(blob["wishlist"], json!([]));
    }

    #[test]
    fn test_no_op_dispatch_does_not_write() {
        let storage = Recording::default();
        let store = Store::new(storage.clone(), &StoreConfig::default());

        store.dispatch(Action::AddToWishlist(product(1, 100)));
        store.dispatch(Action::AddToWishlist(product(1, 100)));
        store.dispatch(Action::RemoveFromCart(ProductId::new(999)));
        store.dispatch(Action::Unknown);

        assert_eq!(storage.writes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_replay_rehydration_round_trips() {
        let storage = MemoryStorage::new();
        let first = Store::new(storage.clone(), &StoreConfig::default());
        first.dispatch(Action::Login(user()));
        first.dispatch(Action::AddToWishlist(product(1, 100)));
        first.dispatch(Action::AddToWishlist(product(2, 200)));
        first.dispatch(Action::AddToCart(line(3, 300, 2)));
        first.dispatch(Action::AddToCart(line(4, 400, 1)));

        let second = Store::new(storage, &StoreConfig::default());
        assert_eq!(*second.state(), *first.state());
    }

    #[test]
    fn test_replay_merges_duplicate_stored_cart_lines() {
        let blob = json!({
            "cart": [
                serde_json::to_value(line(5, 500, 2)).unwrap(),
                serde_json::to_value(line(5, 500, 3)).unwrap(),
            ]
        });
        let storage = MemoryStorage::new().with_item(KEY, blob.to_string());
        let store = Store::new(storage.clone(), &StoreConfig::default());

        let state = store.state();
        assert_eq!(state.cart().len(), 1);
        assert_eq!(state.cart()[0].quantity.get(), 5);
        // Replay also rewrote the slot with the merged line.
        assert_eq!(stored(&storage)["cart"][0]["quantity"], json!(5));
    }

    #[test]
    fn test_snapshot_rehydration_keeps_first_duplicate() {
        let blob = json!({
            "cart": [
                serde_json::to_value(line(5, 500, 2)).unwrap(),
                serde_json::to_value(line(5, 500, 3)).unwrap(),
            ]
        });
        let storage = MemoryStorage::new().with_item(KEY, blob.to_string());
        let config = StoreConfig::default().with_rehydrate(RehydrateMode::Snapshot);
        let store = Store::new(storage.clone(), &config);

        let state = store.state();
        assert_eq!(state.cart().len(), 1);
        assert_eq!(state.cart()[0].quantity.get(), 2);
        assert_eq!(stored(&storage)["cart"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_default() {
        let storage = MemoryStorage::new().with_item(KEY, "{\"cart\": [oops");
        let store = Store::new(storage.clone(), &StoreConfig::default());

        assert_eq!(*store.state(), AppState::default());
        assert!(matches!(store.read_persisted(), Err(StoreError::Corrupt(_))));

        // The next change overwrites the bad blob.
        store.dispatch(Action::AddToWishlist(product(1, 100)));
        assert!(store.read_persisted().unwrap().is_some());
    }

    #[test]
    fn test_write_failure_keeps_state_and_is_reported() {
        let storage = Recording::default();
        let store = Store::new(storage.clone(), &StoreConfig::default());

        storage.reject.store(true, Ordering::SeqCst);
        store.dispatch(Action::AddToCart(line(1, 100, 1)));

        assert_eq!(store.state().cart().len(), 1);
        assert!(
            store
                .last_persistence_error()
                .unwrap()
                .contains("quota exceeded")
        );

        storage.reject.store(false, Ordering::SeqCst);
        store.dispatch(Action::AddToCart(line(1, 100, 1)));
        assert!(store.last_persistence_error().is_none());
    }

    #[test]
    fn test_subscribers_see_each_new_snapshot() {
        let store = Store::in_memory();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let id = store.subscribe(move |state| {
            sink.lock().unwrap().push(state.cart_item_count());
        });

        store.dispatch(Action::AddToCart(line(1, 100, 2)));
        store.dispatch(Action::RemoveFromCart(ProductId::new(42)));
        store.dispatch(Action::AddToCart(line(1, 100, 1)));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(Action::ClearCart);

        assert_eq!(*seen.lock().unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_listener_can_read_store() {
        let store = Store::in_memory();
        let observed = Arc::new(AtomicUsize::new(0));

        let handle = store.clone();
        let counter = Arc::clone(&observed);
        store.subscribe(move |_| {
            counter.store(handle.state().wishlist().len(), Ordering::SeqCst);
        });

        store.dispatch(Action::AddToWishlist(product(1, 100)));
        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reset_clears_slot_and_state() {
        let storage = MemoryStorage::new();
        let store = Store::new(storage.clone(), &StoreConfig::default());
        store.dispatch(Action::Login(user()));

        store.reset().unwrap();
        assert!(!store.state().is_authenticated());
        assert!(storage.get_item(KEY).unwrap().is_none());
    }

    #[test]
    fn test_custom_storage_key() {
        let storage = MemoryStorage::new();
        let config = StoreConfig {
            storage_key: "preview-state".to_string(),
            ..StoreConfig::default()
        };
        let store = Store::new(storage.clone(), &config);
        store.dispatch(Action::Login(user()));

        assert_eq!(store.storage_key(), "preview-state");
        assert!(storage.get_item("preview-state").unwrap().is_some());
        assert!(storage.get_item(KEY).unwrap().is_none());
    }
}
