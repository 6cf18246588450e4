//! Intent processing.
//!
//! User intents flow through a single-slot mailbox into one worker task,
//! the only write path into the cart store. The mailbox overwrites a
//! pending intent with a newer one (latest-wins, never an unbounded
//! backlog), and the worker cancels an in-flight intent's handler when a
//! newer one arrives. Cancellation happens at the handler's next await
//! point: a write not yet handed to the store never happens, while a
//! write already dispatched runs to completion in its own task and is
//! simply superseded by the next recomputation.

use crate::aggregate::CatalogState;
use crate::publisher::ViewStatePublisher;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use storefront_core::{
    CartStore, CartStoreError, Notification, QuantityIntent, FALLBACK_ITEM_TITLE,
};
use tokio::sync::watch;

/// The mailbox's single slot, stamped so the worker can tell a fresh
/// intent from one it already picked up.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct MailboxSlot {
    seq: u64,
    intent: Option<QuantityIntent>,
}

/// Single-slot intent mailbox: a new intent overwrites a pending one.
#[derive(Debug)]
pub(crate) struct IntentMailbox {
    slot: watch::Sender<MailboxSlot>,
}

impl IntentMailbox {
    pub(crate) fn new() -> Self {
        let (slot, _) = watch::channel(MailboxSlot::default());
        Self { slot }
    }

    /// Overwrite the slot with a new intent and wake the worker.
    pub(crate) fn submit(&self, intent: QuantityIntent) {
        self.slot.send_modify(|slot| {
            slot.seq += 1;
            slot.intent = Some(intent);
        });
    }

    pub(crate) fn watch(&self) -> watch::Receiver<MailboxSlot> {
        self.slot.subscribe()
    }
}

/// A quantity change the cart store rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedIntent {
    /// The intent whose effect was dropped.
    pub intent: QuantityIntent,
    /// The store error that rejected it.
    pub error: String,
}

/// Bounded queue of intents the cart store rejected.
///
/// Store write failures are dropped, not retried and not surfaced as view
/// state; this queue is the observability sink where they land for
/// inspection. Oldest entries are evicted when the queue is full.
#[derive(Clone, Debug)]
pub struct FailedIntents {
    queue: Arc<Mutex<VecDeque<FailedIntent>>>,
    max_size: usize,
}

impl FailedIntents {
    /// Create a queue holding at most `max_size` entries.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            max_size,
        }
    }

    /// Record a rejected intent, evicting the oldest entry when full.
    pub fn push(&self, intent: QuantityIntent, error: String) {
        let mut queue = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if queue.len() >= self.max_size {
            queue.pop_front();
            tracing::warn!(
                max_size = self.max_size,
                "failed-intent queue at capacity, dropping oldest entry"
            );
        }
        queue.push_back(FailedIntent { intent, error });

        // Queue sizes are bounded by max_size, well within f64 range
        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!("session.failed_intents.size").set(queue.len() as f64);
    }

    /// Number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether any failures are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain all recorded failures, oldest first.
    pub fn drain(&self) -> Vec<FailedIntent> {
        let mut queue = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        metrics::gauge!("session.failed_intents.size").set(0.0);
        queue.drain(..).collect()
    }
}

/// Worker loop: drain the mailbox with latest-wins semantics.
///
/// The application future runs inside the worker's own select, so a newer
/// intent cancels it outright at its next await point. A superseded
/// intent that never reached its store write leaves no trace.
pub(crate) async fn run_intent_worker(
    mut mailbox: watch::Receiver<MailboxSlot>,
    store: Arc<dyn CartStore>,
    catalog: watch::Receiver<CatalogState>,
    publisher: Arc<ViewStatePublisher>,
    failed: FailedIntents,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut last_picked = 0;
    loop {
        let MailboxSlot { seq, intent } = *mailbox.borrow_and_update();
        let Some(intent) = intent.filter(|_| seq != last_picked) else {
            tokio::select! {
                changed = mailbox.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
            continue;
        };
        last_picked = seq;

        let application = apply_intent(
            Arc::clone(&store),
            catalog.clone(),
            Arc::clone(&publisher),
            failed.clone(),
            intent,
        );
        tokio::pin!(application);
        tokio::select! {
            () = &mut application => {}
            changed = mailbox.changed() => {
                if changed.is_err() {
                    break;
                }
                // A newer intent arrived: drop this one's handler. A write
                // not yet handed to the store never happens; one already
                // dispatched runs to completion in its own task.
                metrics::counter!("session.intents.superseded").increment(1);
                tracing::debug!(product_id = %intent.product_id, "intent superseded in flight");
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    tracing::debug!("intent worker exiting");
}

/// The quantity-change algorithm:
///
/// 1. read the current quantity (zero if absent), always from the store,
///    never from a cached snapshot;
/// 2. step it by the intent's direction;
/// 3. if the result drops below one, emit the removal notification using
///    the product's title from the latest catalog (or the fallback);
/// 4. hand the computed value to the store, which applies the sub-1 to
///    delete normalization itself.
///
/// Everything up to the write is cancellable: the worker drops this
/// future when a newer intent supersedes it, and a superseded handler
/// that never reached step 4 leaves no trace. The write itself runs in
/// its own task and completes, reporting its outcome, even if the handler
/// is dropped while awaiting it.
///
/// No optimistic state is applied: on failure the previous snapshot simply
/// stays visible until the store's own change notification fires.
async fn apply_intent(
    store: Arc<dyn CartStore>,
    catalog: watch::Receiver<CatalogState>,
    publisher: Arc<ViewStatePublisher>,
    failed: FailedIntents,
    intent: QuantityIntent,
) {
    let current = match store.quantity(intent.product_id).await {
        Ok(quantity) => quantity.unwrap_or(0),
        Err(error) => {
            report_rejection(&failed, intent, &error);
            return;
        }
    };
    let next = i64::from(current) + intent.direction.delta();

    if next < 1 {
        let title = catalog
            .borrow()
            .title_of(intent.product_id)
            .unwrap_or(FALLBACK_ITEM_TITLE)
            .to_owned();
        publisher.notify(Notification::removed_from_cart(&title));
    }

    let write = tokio::spawn(async move {
        match store.set_quantity(intent.product_id, next).await {
            Ok(()) => {
                metrics::counter!("session.intents.applied").increment(1);
            }
            Err(error) => report_rejection(&failed, intent, &error),
        }
    });
    if let Err(join_error) = write.await {
        tracing::error!(%join_error, "cart write task failed");
    }
}

fn report_rejection(failed: &FailedIntents, intent: QuantityIntent, error: &CartStoreError) {
    metrics::counter!("session.intents.failed").increment(1);
    tracing::error!(
        product_id = %intent.product_id,
        %error,
        "cart store rejected quantity change"
    );
    failed.push(intent, error.to_string());
}
