//! Cart store contract.
//!
//! The cart is a persisted mapping of product id to desired quantity and is
//! the single source of truth for quantities. Absence means zero; an entry
//! with quantity below one must never exist, so the store deletes the row
//! instead of persisting a sub-1 value.

use crate::product::ProductId;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tokio::sync::watch;

/// The full persisted cart mapping: product id → quantity (always ≥ 1).
///
/// A `BTreeMap` pins a deterministic cart order (ascending product id) for
/// derived cart lines.
pub type CartQuantities = BTreeMap<ProductId, u32>;

/// Error produced by a failed cart store read or write.
///
/// Store failures are recoverable: the triggering operation's effect is
/// dropped and reported to an observability sink, never surfaced as view
/// state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("cart store operation failed: {0}")]
pub struct CartStoreError(String);

impl CartStoreError {
    /// Create a new store error with the given description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A persisted key-value cart keyed by product id.
///
/// Implementations own quantity persistence and the sub-1 → delete
/// normalization. All writes for a session are serialized through the
/// session's intent worker; reads may run concurrently.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `async fn` so implementations can be held as `Arc<dyn CartStore>` and
/// captured by spawned tasks.
pub trait CartStore: Send + Sync {
    /// Observe the full cart mapping.
    ///
    /// The receiver holds the latest complete mapping and is notified after
    /// every completed write. Observers see a monotonically-replacing
    /// sequence of mappings; intermediate states may be skipped.
    fn observe(&self) -> watch::Receiver<CartQuantities>;

    /// Read the current quantity for a product, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the underlying store is unavailable.
    fn quantity(
        &self,
        id: ProductId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<u32>, CartStoreError>> + Send + '_>>;

    /// Set the quantity for a product.
    ///
    /// A `quantity` below one deletes the entry instead of storing it; the
    /// invariant that no persisted entry has quantity < 1 is applied here,
    /// by construction, and is never an externally visible error.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the write fails. No partial state is
    /// applied on failure.
    fn set_quantity(
        &self,
        id: ProductId,
        quantity: i64,
    ) -> Pin<Box<dyn Future<Output = Result<(), CartStoreError>> + Send + '_>>;

    /// Delete the entry for a product, if present.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the write fails.
    fn remove(
        &self,
        id: ProductId,
    ) -> Pin<Box<dyn Future<Output = Result<(), CartStoreError>> + Send + '_>>;
}
