//! Cart store fakes.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use storefront_core::{CartQuantities, CartStore, CartStoreError, ProductId};
use storefront_runtime::MemoryCartStore;
use tokio::sync::watch;

/// Cart store whose reads succeed and whose writes always fail.
///
/// Exercises the dropped-intent path: no partial state is applied and the
/// previous snapshot stays visible.
#[derive(Debug, Default)]
pub struct RejectingCartStore {
    inner: MemoryCartStore,
}

impl RejectingCartStore {
    /// Create an empty rejecting store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for RejectingCartStore {
    fn observe(&self) -> watch::Receiver<CartQuantities> {
        self.inner.observe()
    }

    fn quantity(
        &self,
        id: ProductId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<u32>, CartStoreError>> + Send + '_>> {
        self.inner.quantity(id)
    }

    fn set_quantity(
        &self,
        _id: ProductId,
        _quantity: i64,
    ) -> Pin<Box<dyn Future<Output = Result<(), CartStoreError>> + Send + '_>> {
        Box::pin(async { Err(CartStoreError::new("write rejected")) })
    }

    fn remove(
        &self,
        _id: ProductId,
    ) -> Pin<Box<dyn Future<Output = Result<(), CartStoreError>> + Send + '_>> {
        Box::pin(async { Err(CartStoreError::new("write rejected")) })
    }
}

/// Cart store whose reads block until the gate is opened.
///
/// Lets a test hold an intent application in flight deliberately, then
/// submit newer intents and observe latest-wins behavior before releasing
/// everything at once.
#[derive(Debug)]
pub struct GatedCartStore {
    inner: MemoryCartStore,
    gate: watch::Sender<bool>,
    reads_seen: AtomicUsize,
    gated_reads: usize,
}

impl GatedCartStore {
    /// Create an empty store with the gate closed; every read waits.
    #[must_use]
    pub fn new() -> Self {
        Self::gating_first_reads(usize::MAX)
    }

    /// Create an empty store that gates only the first `gated_reads`
    /// quantity reads; later reads pass through immediately.
    ///
    /// Useful for parking one intent's read while a subsequent intent
    /// proceeds unimpeded.
    #[must_use]
    pub fn gating_first_reads(gated_reads: usize) -> Self {
        let (gate, _) = watch::channel(false);
        Self {
            inner: MemoryCartStore::new(),
            gate,
            reads_seen: AtomicUsize::new(0),
            gated_reads,
        }
    }

    /// Open the gate, releasing all pending and future gated reads.
    pub fn open(&self) {
        self.gate.send_replace(true);
    }
}

impl Default for GatedCartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore for GatedCartStore {
    fn observe(&self) -> watch::Receiver<CartQuantities> {
        self.inner.observe()
    }

    fn quantity(
        &self,
        id: ProductId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<u32>, CartStoreError>> + Send + '_>> {
        let gated = self.reads_seen.fetch_add(1, Ordering::SeqCst) < self.gated_reads;
        let mut gate = self.gate.subscribe();
        Box::pin(async move {
            if gated {
                // A closed gate with a dropped sender would deadlock the
                // test; treat it as open.
                let _ = gate.wait_for(|open| *open).await;
            }
            self.inner.quantity(id).await
        })
    }

    fn set_quantity(
        &self,
        id: ProductId,
        quantity: i64,
    ) -> Pin<Box<dyn Future<Output = Result<(), CartStoreError>> + Send + '_>> {
        self.inner.set_quantity(id, quantity)
    }

    fn remove(
        &self,
        id: ProductId,
    ) -> Pin<Box<dyn Future<Output = Result<(), CartStoreError>> + Send + '_>> {
        self.inner.remove(id)
    }
}
