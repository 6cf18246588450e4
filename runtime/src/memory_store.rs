//! In-memory cart store.
//!
//! The prototype's cart persistence: the full mapping lives behind a watch
//! channel, so every completed write publishes the new mapping to
//! observers. The sub-1 delete normalization happens here, by
//! construction: a quantity below one never reaches the mapping.

use std::future::Future;
use std::pin::Pin;
use storefront_core::{CartQuantities, CartStore, CartStoreError, ProductId};
use tokio::sync::watch;

/// Key-value cart store backed by process memory.
///
/// Writes are serialized by the session's intent worker; reads may run
/// concurrently.
#[derive(Debug)]
pub struct MemoryCartStore {
    entries: watch::Sender<CartQuantities>,
}

impl MemoryCartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (entries, _) = watch::channel(CartQuantities::new());
        Self { entries }
    }

    /// Create a store pre-populated with the given mapping.
    ///
    /// Entries below quantity one are discarded, keeping the store
    /// invariant intact from the start.
    #[must_use]
    pub fn with_entries(entries: CartQuantities) -> Self {
        let store = Self::new();
        store.entries.send_modify(|map| {
            *map = entries.into_iter().filter(|&(_, count)| count >= 1).collect();
        });
        store
    }
}

impl Default for MemoryCartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore for MemoryCartStore {
    fn observe(&self) -> watch::Receiver<CartQuantities> {
        self.entries.subscribe()
    }

    fn quantity(
        &self,
        id: ProductId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<u32>, CartStoreError>> + Send + '_>> {
        Box::pin(async move { Ok(self.entries.borrow().get(&id).copied()) })
    }

    fn set_quantity(
        &self,
        id: ProductId,
        quantity: i64,
    ) -> Pin<Box<dyn Future<Output = Result<(), CartStoreError>> + Send + '_>> {
        Box::pin(async move {
            self.entries.send_modify(|map| {
                if quantity < 1 {
                    map.remove(&id);
                } else {
                    map.insert(id, u32::try_from(quantity).unwrap_or(u32::MAX));
                }
            });
            Ok(())
        })
    }

    fn remove(
        &self,
        id: ProductId,
    ) -> Pin<Box<dyn Future<Output = Result<(), CartStoreError>> + Send + '_>> {
        Box::pin(async move {
            self.entries.send_modify(|map| {
                map.remove(&id);
            });
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use futures::executor::block_on;
    use proptest::prelude::*;

    #[test]
    fn absent_product_reads_none() {
        let store = MemoryCartStore::new();
        assert_eq!(block_on(store.quantity(ProductId::new(1))).unwrap(), None);
    }

    #[test]
    fn set_and_read_back() {
        let store = MemoryCartStore::new();
        block_on(store.set_quantity(ProductId::new(1), 2)).unwrap();
        assert_eq!(block_on(store.quantity(ProductId::new(1))).unwrap(), Some(2));
    }

    #[test]
    fn sub_one_quantity_deletes_entry() {
        let store = MemoryCartStore::new();
        block_on(store.set_quantity(ProductId::new(1), 1)).unwrap();
        block_on(store.set_quantity(ProductId::new(1), 0)).unwrap();
        assert_eq!(block_on(store.quantity(ProductId::new(1))).unwrap(), None);

        block_on(store.set_quantity(ProductId::new(2), -3)).unwrap();
        assert_eq!(block_on(store.quantity(ProductId::new(2))).unwrap(), None);
    }

    #[test]
    fn writes_publish_full_mapping_to_observers() {
        let store = MemoryCartStore::new();
        let rx = store.observe();
        block_on(store.set_quantity(ProductId::new(1), 4)).unwrap();
        assert_eq!(rx.borrow().get(&ProductId::new(1)), Some(&4));

        block_on(store.remove(ProductId::new(1))).unwrap();
        assert!(rx.borrow().is_empty());
    }

    #[test]
    fn with_entries_discards_invalid_rows() {
        let seeded = MemoryCartStore::with_entries(CartQuantities::from([
            (ProductId::new(1), 2),
            (ProductId::new(2), 0),
        ]));
        let mapping = seeded.observe().borrow().clone();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get(&ProductId::new(1)), Some(&2));
    }

    proptest! {
        /// After any sequence of writes, no entry holds a quantity below one.
        #[test]
        fn never_holds_sub_one_entries(
            ops in prop::collection::vec((0_u64..10, -5_i64..10), 0..50),
        ) {
            let store = MemoryCartStore::new();
            for (id, quantity) in ops {
                block_on(store.set_quantity(ProductId::new(id), quantity)).unwrap();
            }
            let mapping = store.observe().borrow().clone();
            prop_assert!(mapping.values().all(|&count| count >= 1));
        }
    }
}
