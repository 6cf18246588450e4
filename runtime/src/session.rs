//! Cart session wiring.
//!
//! A [`CartSession`] owns one aggregator and one intent worker, making it
//! the single logical owner of a cart. Collaborators are injected explicitly
//! at construction; there is no ambient global state.

use crate::aggregate::{run_aggregator, CatalogState};
use crate::intents::{run_intent_worker, FailedIntents, IntentMailbox};
use crate::publisher::ViewStatePublisher;
use std::sync::Arc;
use storefront_core::{CartStore, CatalogSource, Notification, QuantityIntent, ViewSnapshot};
use tokio::sync::{mpsc, watch};

/// Configuration for a [`CartSession`].
///
/// # Example
///
/// ```ignore
/// let config = SessionConfig::default()
///     .with_notification_capacity(32)
///     .with_failed_intent_capacity(500);
///
/// let session = CartSession::with_config(catalog, store, config);
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Buffer size of the one-shot notification channel.
    pub notification_capacity: usize,
    /// Maximum number of rejected intents retained for inspection.
    pub failed_intent_capacity: usize,
}

impl SessionConfig {
    /// Set the notification channel capacity.
    #[must_use]
    pub const fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity;
        self
    }

    /// Set the failed-intent queue capacity.
    #[must_use]
    pub const fn with_failed_intent_capacity(mut self, capacity: usize) -> Self {
        self.failed_intent_capacity = capacity;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            notification_capacity: 16,
            failed_intent_capacity: 100,
        }
    }
}

/// One running cart session: catalog + cart store in, derived view state
/// and notifications out, quantity intents back.
///
/// The session spawns two tasks:
///
/// - the **aggregator**, a combine-latest subscriber that recomputes the
///   whole [`ViewSnapshot`] whenever the catalog result or the cart
///   mapping changes;
/// - the **intent worker**, the single serialized write path into the cart
///   store, draining a latest-wins single-slot mailbox.
///
/// Dropping the session (or calling [`shutdown`](Self::shutdown)) stops
/// both tasks; store writes already dispatched complete on their own.
pub struct CartSession {
    catalog: Arc<dyn CatalogSource>,
    catalog_states: watch::Sender<CatalogState>,
    publisher: Arc<ViewStatePublisher>,
    mailbox: IntentMailbox,
    failed: FailedIntents,
    shutdown: watch::Sender<bool>,
}

impl CartSession {
    /// Start a session with the default configuration and trigger the
    /// eager initial catalog load.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn start(catalog: Arc<dyn CatalogSource>, store: Arc<dyn CartStore>) -> Self {
        Self::with_config(catalog, store, SessionConfig::default())
    }

    /// Start a session with a custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn with_config(
        catalog: Arc<dyn CatalogSource>,
        store: Arc<dyn CartStore>,
        config: SessionConfig,
    ) -> Self {
        let (catalog_states, catalog_rx) = watch::channel(CatalogState::Idle);
        let (shutdown, shutdown_rx) = watch::channel(false);
        let publisher = Arc::new(ViewStatePublisher::new(config.notification_capacity));
        let mailbox = IntentMailbox::new();
        let failed = FailedIntents::new(config.failed_intent_capacity);

        tokio::spawn(run_aggregator(
            catalog_rx.clone(),
            store.observe(),
            Arc::clone(&publisher),
            shutdown_rx.clone(),
        ));
        tokio::spawn(run_intent_worker(
            mailbox.watch(),
            store,
            catalog_rx,
            Arc::clone(&publisher),
            failed.clone(),
            shutdown_rx,
        ));

        let session = Self {
            catalog,
            catalog_states,
            publisher,
            mailbox,
            failed,
            shutdown,
        };
        session.refresh();
        session
    }

    /// Re-fetch the catalog.
    ///
    /// The fetch runs in its own task; its result, success or failure,
    /// replaces the previous catalog state entirely and triggers a
    /// recomputation. Failed loads are retried only through this explicit
    /// re-trigger.
    pub fn refresh(&self) {
        metrics::counter!("session.catalog.refreshes").increment(1);
        let catalog = Arc::clone(&self.catalog);
        let states = self.catalog_states.clone();
        tokio::spawn(async move {
            let result = catalog.fetch_all().await;
            if let Err(error) = &result {
                tracing::warn!(%error, "catalog fetch failed");
            }
            states.send_replace(CatalogState::from(result));
        });
    }

    /// Submit a quantity-change intent.
    ///
    /// Never blocks and never queues a backlog: a pending intent that the
    /// worker has not picked up yet is overwritten by this one.
    pub fn submit(&self, intent: QuantityIntent) {
        metrics::counter!("session.intents.submitted").increment(1);
        tracing::debug!(product_id = %intent.product_id, ?intent.direction, "intent submitted");
        self.mailbox.submit(intent);
    }

    /// Read the current derived snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        self.publisher.current()
    }

    /// Subscribe to snapshot replacements.
    ///
    /// Subscribers observe a monotonically-replacing sequence of whole
    /// snapshots; intermediate states may be skipped.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.publisher.subscribe()
    }

    /// Take the one-shot notification receiver.
    ///
    /// Returns `Some` on the first call and `None` afterwards.
    #[must_use]
    pub fn take_notifications(&self) -> Option<mpsc::Receiver<Notification>> {
        self.publisher.take_notifications()
    }

    /// The queue of intents the cart store rejected.
    #[must_use]
    pub fn failed_intents(&self) -> FailedIntents {
        self.failed.clone()
    }

    /// Stop the aggregator and intent worker.
    ///
    /// A store write already dispatched by the worker completes on its
    /// own; nothing new is picked up afterwards.
    pub fn shutdown(&self) {
        tracing::debug!("session shutting down");
        self.shutdown.send_replace(true);
    }
}
