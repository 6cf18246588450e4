//! View state publication.
//!
//! The publisher holds exactly one current [`ViewSnapshot`] and one
//! transient [`Notification`] channel. Snapshots are replaced whole on
//! every recomputation, never patched, and subscribers observe a
//! monotonically-replacing sequence (only the latest value at notification
//! time, consistent with the combine-latest contract). Notifications are
//! one-shot: each is delivered to at most one consumer and never
//! re-delivered.

use std::sync::{Mutex, PoisonError};
use storefront_core::{Notification, ViewSnapshot};
use tokio::sync::{mpsc, watch};

/// Holds the current derived snapshot and the one-shot notification
/// channel for a single cart session.
#[derive(Debug)]
pub struct ViewStatePublisher {
    snapshots: watch::Sender<ViewSnapshot>,
    notifications: mpsc::Sender<Notification>,
    /// Handed out at most once; the single receiver is the only consumer.
    pending_receiver: Mutex<Option<mpsc::Receiver<Notification>>>,
}

impl ViewStatePublisher {
    /// Create a publisher with the initial (not loading, empty, no error)
    /// snapshot and a notification buffer of the given capacity.
    #[must_use]
    pub fn new(notification_capacity: usize) -> Self {
        let (snapshots, _) = watch::channel(ViewSnapshot::default());
        let (notifications, receiver) = mpsc::channel(notification_capacity);
        Self {
            snapshots,
            notifications,
            pending_receiver: Mutex::new(Some(receiver)),
        }
    }

    /// Read the current snapshot.
    #[must_use]
    pub fn current(&self) -> ViewSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    ///
    /// The receiver always exposes the latest snapshot; intermediate
    /// snapshots may be skipped.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.snapshots.subscribe()
    }

    /// Replace the current snapshot atomically.
    pub fn publish(&self, snapshot: ViewSnapshot) {
        self.snapshots.send_replace(snapshot);
        metrics::counter!("session.snapshots.published").increment(1);
    }

    /// Emit a one-shot notification.
    ///
    /// If no consumer has capacity for it, the notification is dropped:
    /// transient messages are never queued unboundedly or re-delivered.
    pub fn notify(&self, notification: Notification) {
        match self.notifications.try_send(notification) {
            Ok(()) => {
                metrics::counter!("session.notifications.emitted").increment(1);
            }
            Err(error) => {
                metrics::counter!("session.notifications.dropped").increment(1);
                tracing::warn!(%error, "notification dropped");
            }
        }
    }

    /// Take the notification receiver.
    ///
    /// Returns `Some` on the first call and `None` afterwards: each
    /// notification goes to at most one consumer.
    #[must_use]
    pub fn take_notifications(&self) -> Option<mpsc::Receiver<Notification>> {
        self.pending_receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    #[test]
    fn publish_replaces_current_without_subscribers() {
        let publisher = ViewStatePublisher::new(4);
        let replaced = ViewSnapshot {
            total: "$9.99".to_owned(),
            ..ViewSnapshot::default()
        };
        publisher.publish(replaced.clone());
        assert_eq!(publisher.current(), replaced);
    }

    #[test]
    fn subscribers_observe_latest_snapshot() {
        let publisher = ViewStatePublisher::new(4);
        let rx = publisher.subscribe();
        publisher.publish(ViewSnapshot {
            total: "$1.00".to_owned(),
            ..ViewSnapshot::default()
        });
        publisher.publish(ViewSnapshot {
            total: "$2.00".to_owned(),
            ..ViewSnapshot::default()
        });
        assert_eq!(rx.borrow().total, "$2.00");
    }

    #[test]
    fn notification_receiver_is_handed_out_once() {
        let publisher = ViewStatePublisher::new(4);
        assert!(publisher.take_notifications().is_some());
        assert!(publisher.take_notifications().is_none());
    }

    #[tokio::test]
    async fn notifications_are_delivered_once() {
        let publisher = ViewStatePublisher::new(4);
        let mut rx = publisher.take_notifications().unwrap();

        publisher.notify(Notification::removed_from_cart("Cookies"));

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.message(), "Cookies removed from cart");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn notify_with_full_buffer_drops_instead_of_blocking() {
        let publisher = ViewStatePublisher::new(1);
        publisher.notify(Notification::removed_from_cart("A"));
        // Buffer full: this one is dropped, not queued.
        publisher.notify(Notification::removed_from_cart("B"));

        let mut rx = publisher.take_notifications().unwrap();
        assert_eq!(rx.try_recv().unwrap().message(), "A removed from cart");
        assert!(rx.try_recv().is_err());
    }
}
