//! # Storefront Core
//!
//! Core data model and collaborator contracts for the storefront cart
//! aggregation engine.
//!
//! This crate defines the vocabulary shared by every other workspace member:
//!
//! - **Catalog types**: [`Product`], [`ProductId`], the [`CatalogSource`]
//!   contract and its [`CatalogError`]
//! - **Cart types**: [`CartQuantities`], the [`CartStore`] contract and its
//!   [`CartStoreError`]
//! - **Derived view types**: [`StoreItemView`], [`CartLineView`],
//!   [`ViewSnapshot`], [`Notification`]
//! - **Intents**: [`QuantityIntent`] and [`Direction`]
//!
//! ## Architecture Principles
//!
//! - Data flows one direction: catalog + cart → derived snapshot → consumer
//! - Collaborators are traits injected by the caller, never ambient globals
//! - Derived types are read-only projections, recomputed rather than patched
//!
//! The runtime machinery that combines these pieces lives in
//! `storefront-runtime`; the HTTP catalog adapter lives in
//! `storefront-catalog`.

pub mod cart;
pub mod catalog;
pub mod intent;
pub mod money;
pub mod product;
pub mod view;

pub use cart::{CartQuantities, CartStore, CartStoreError};
pub use catalog::{CatalogError, CatalogSource, DEFAULT_CATALOG_ERROR};
pub use intent::{Direction, QuantityIntent};
pub use money::format_usd;
pub use product::{Product, ProductId};
pub use view::{CartLineView, Notification, StoreItemView, ViewSnapshot, FALLBACK_ITEM_TITLE};
