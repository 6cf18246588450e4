//! # Storefront Testing
//!
//! Deterministic fakes and helpers for testing the cart engine:
//!
//! - [`FailingCatalog`]: every fetch fails, with or without a message
//! - [`ScriptedCatalog`]: plays back a queued sequence of fetch results
//! - [`RejectingCartStore`]: reads succeed, writes always fail
//! - [`GatedCartStore`]: reads block until a gate is opened, for driving
//!   latest-wins races deterministically
//! - [`await_snapshot`]: wait for a published snapshot matching a
//!   predicate
//!
//! Everything here is in-process and deterministic; no test needs the
//! network or a real persistence engine.

mod catalog_mocks;
mod helpers;
mod store_mocks;

pub use catalog_mocks::{FailingCatalog, ScriptedCatalog};
pub use helpers::{await_snapshot, cookies_product};
pub use store_mocks::{GatedCartStore, RejectingCartStore};
