//! Test helpers.

#![allow(clippy::panic)] // Test helpers panic to fail the surrounding test
#![allow(clippy::expect_used)]

use std::time::Duration;
use storefront_core::{Product, ProductId, ViewSnapshot};
use tokio::sync::watch;

/// How long [`await_snapshot`] waits before failing the test.
const SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(2);

/// Wait until the published snapshot matches the predicate and return it.
///
/// # Panics
///
/// Panics if the snapshot channel closes or no matching snapshot appears
/// within two seconds.
pub async fn await_snapshot(
    snapshots: &mut watch::Receiver<ViewSnapshot>,
    predicate: impl Fn(&ViewSnapshot) -> bool,
) -> ViewSnapshot {
    tokio::time::timeout(SNAPSHOT_TIMEOUT, async {
        loop {
            {
                let current = snapshots.borrow_and_update();
                if predicate(&current) {
                    return current.clone();
                }
            }
            if snapshots.changed().await.is_err() {
                panic!("snapshot channel closed before a matching snapshot appeared");
            }
        }
    })
    .await
    .expect("timed out waiting for a matching snapshot")
}

/// The single-product fixture used throughout the scenario tests.
#[must_use]
pub fn cookies_product() -> Product {
    Product::new(
        ProductId::new(1),
        "Cookies".to_owned(),
        5.0,
        "A box of cookies".to_owned(),
        "snacks".to_owned(),
        "https://example.com/cookies.jpg".to_owned(),
    )
}
