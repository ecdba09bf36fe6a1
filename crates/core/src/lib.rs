//! Unidemy Core - Shared types library.
//!
//! This crate provides the marketplace types used across all Unidemy components:
//! - `storefront` - Cart, wishlist, and session state container
//! - `cli` - Command-line client driving the state container
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere,
//! including in the browser.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, quantities, emails, and catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
