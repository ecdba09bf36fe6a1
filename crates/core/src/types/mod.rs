//! Core types for Unidemy.
//!
//! This module provides type-safe wrappers for marketplace concepts and the
//! catalog records shared between the store and its consumers.

pub mod catalog;
pub mod email;
pub mod id;
pub mod price;
pub mod quantity;
pub mod user;

pub use catalog::{CartItem, Category, Product, Seller};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use quantity::{Quantity, QuantityError};
pub use user::User;
