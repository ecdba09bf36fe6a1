//! Unidemy Storefront - Client-side session, wishlist, and cart state.
//!
//! The storefront pages (category grid, listing cards, wishlist page) are thin
//! views. Everything they read or change about the shopper goes through the
//! [`Store`] in this crate.
//!
//! # Architecture
//!
//! - [`action::Action`] - closed set of state transitions
//! - [`reducer::reduce`] - pure `(state, action) -> state` function
//! - [`state::AppState`] - immutable snapshot plus derived selectors
//! - [`storage`] - durable key-value slot (memory, file, browser `localStorage`)
//! - [`store::Store`] - holds the current snapshot, persists after each change,
//!   and rehydrates on creation
//! - [`context`] - scoped provider so views can look the store up
//! - [`auth::Auth`] - login/logout facade over the store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod reducer;
pub mod state;
pub mod storage;
pub mod store;

pub use action::Action;
pub use auth::Auth;
pub use config::{ConfigError, RehydrateMode, StoreConfig};
pub use context::{AppProvider, ProviderGuard, try_use_app, use_app};
pub use error::{StorageError, StoreError};
pub use state::{AppState, PersistedState};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{Store, SubscriptionId};
