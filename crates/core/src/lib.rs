//! Luxury Core - shopper state machine for the Luxury storefront.
//!
//! This crate holds everything the storefront knows about products, carts and
//! favorites, without any I/O:
//! - `storefront` renders it over HTTP and keeps a [`ShopState`] per session
//!
//! # Architecture
//!
//! State changes only through [`ShopState::dispatch`] with a typed [`Action`].
//! Everything the UI shows (filtered products, cart total, favorites list) is
//! derived on read by [`ViewModel::derive`] and never stored.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and currency-aware prices
//! - [`catalog`] - The immutable product fixture and category filtering
//! - [`cart`] - Cart lines keyed by product, color and size
//! - [`favorites`] - Set of favorited products
//! - [`page`] - Which page is shown and what is selected on it
//! - [`store`] - The per-shopper state container and its actions
//! - [`view`] - Derived view model for rendering

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod page;
pub mod store;
pub mod types;
pub mod view;

pub use cart::{Cart, CartError, CartLine};
pub use catalog::{ALL_CATEGORIES, Catalog, CatalogError, CategoryFilter, Product};
pub use favorites::Favorites;
pub use page::{NavTarget, Page, Selection};
pub use store::{Action, ShopError, ShopState};
pub use types::*;
pub use view::{
    CartLineView, CategoryItem, FEATURED_COUNT, NavItem, ProductCard, ProductDetail, ViewModel,
};
