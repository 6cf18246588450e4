//! Snapshot aggregation.
//!
//! The aggregator is a combine-latest subscriber over two upstreams: the
//! latest catalog fetch result and the latest full cart mapping. Whenever
//! either changes, it recomputes the whole [`ViewSnapshot`] from the most
//! recent value of both and publishes it atomically.
//!
//! Derivation itself ([`derive_snapshot`]) is a pure projection with no
//! side effects; it is safe to run any number of times, concurrently, and
//! never caches quantities beyond a single pass.

use crate::publisher::ViewStatePublisher;
use std::sync::Arc;
use storefront_core::{
    format_usd, CartLineView, CartQuantities, CatalogError, Product, StoreItemView, ViewSnapshot,
};
use tokio::sync::watch;

/// The latest known catalog fetch outcome.
///
/// A successful fetch replaces the previous snapshot entirely; a failed
/// fetch discards stale product data rather than preserving it.
#[derive(Clone, Debug, Default)]
pub enum CatalogState {
    /// No fetch has completed yet.
    #[default]
    Idle,
    /// The latest fetch succeeded with this full catalog.
    Ready(Arc<[Product]>),
    /// The latest fetch failed.
    Failed(CatalogError),
}

impl CatalogState {
    /// Look up a product's display title in the latest catalog.
    #[must_use]
    pub fn title_of(&self, id: storefront_core::ProductId) -> Option<&str> {
        match self {
            Self::Ready(products) => products
                .iter()
                .find(|product| product.id == id)
                .map(|product| product.title.as_str()),
            Self::Idle | Self::Failed(_) => None,
        }
    }
}

impl From<Result<Vec<Product>, CatalogError>> for CatalogState {
    fn from(result: Result<Vec<Product>, CatalogError>) -> Self {
        match result {
            Ok(products) => Self::Ready(products.into()),
            Err(error) => Self::Failed(error),
        }
    }
}

/// Derive one complete view snapshot from the latest catalog state and cart
/// mapping.
///
/// - Store items preserve catalog order; each carries the cart quantity
///   (zero when absent) and a formatted subtotal.
/// - Cart lines cover exactly the products present in the cart with
///   quantity ≥ 1, in cart order. Cart entries whose product is missing
///   from the catalog produce no line.
/// - The grand total sums `unit price × quantity` over all catalog
///   products, quantity defaulting to zero.
/// - A failed catalog fetch yields empty lists and the failure's message,
///   falling back to [`storefront_core::DEFAULT_CATALOG_ERROR`].
#[must_use]
pub fn derive_snapshot(catalog: &CatalogState, cart: &CartQuantities) -> ViewSnapshot {
    match catalog {
        CatalogState::Idle => ViewSnapshot::default(),
        CatalogState::Failed(error) => ViewSnapshot {
            error_message: Some(error.display_message().to_owned()),
            ..ViewSnapshot::default()
        },
        CatalogState::Ready(products) => {
            let mut total = 0.0;
            let mut items = Vec::with_capacity(products.len());
            for product in products.iter() {
                let count = cart.get(&product.id).copied().unwrap_or(0);
                let subtotal = product.price * f64::from(count);
                total += subtotal;
                items.push(StoreItemView {
                    id: product.id,
                    title: product.title.clone(),
                    description: product.description.clone(),
                    category: product.category.clone(),
                    image: product.image.clone(),
                    price: format_usd(product.price),
                    count,
                    subtotal: format_usd(subtotal),
                });
            }

            let cart_items = cart
                .iter()
                .filter(|&(_, &count)| count >= 1)
                .filter_map(|(id, &count)| {
                    products.iter().find(|product| product.id == *id).map(|product| {
                        CartLineView {
                            product_id: *id,
                            title: product.title.clone(),
                            unit_price: format_usd(product.price),
                            count,
                            subtotal: format_usd(product.price * f64::from(count)),
                        }
                    })
                })
                .collect();

            ViewSnapshot {
                is_loading: false,
                items,
                cart_items,
                total: format_usd(total),
                error_message: None,
            }
        }
    }
}

/// Combine-latest loop: recompute and publish on every upstream change.
///
/// Holds the latest value from each upstream; a change on one side is
/// combined with the most recent value of the other, never a paired value.
/// Exits when the session shuts down or either upstream closes.
pub(crate) async fn run_aggregator(
    mut catalog: watch::Receiver<CatalogState>,
    mut cart: watch::Receiver<CartQuantities>,
    publisher: Arc<ViewStatePublisher>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        let snapshot = {
            let start = std::time::Instant::now();
            let snapshot = derive_snapshot(&catalog.borrow_and_update(), &cart.borrow_and_update());
            metrics::histogram!("session.snapshot.derive_seconds")
                .record(start.elapsed().as_secs_f64());
            snapshot
        };
        publisher.publish(snapshot);

        tokio::select! {
            changed = catalog.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = cart.changed() => {
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
    }
    tracing::debug!("aggregator loop exiting");
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;
    use storefront_core::{ProductId, DEFAULT_CATALOG_ERROR};

    fn cookies() -> Product {
        Product::new(
            ProductId::new(1),
            "Cookies".to_owned(),
            5.0,
            "A box of cookies".to_owned(),
            "snacks".to_owned(),
            "https://example.com/cookies.jpg".to_owned(),
        )
    }

    fn ready(products: Vec<Product>) -> CatalogState {
        CatalogState::Ready(products.into())
    }

    #[test]
    fn idle_catalog_derives_default_snapshot() {
        let snapshot = derive_snapshot(&CatalogState::Idle, &CartQuantities::new());
        assert_eq!(snapshot, ViewSnapshot::default());
    }

    #[test]
    fn empty_cart_lists_catalog_at_zero() {
        let snapshot = derive_snapshot(&ready(vec![cookies()]), &CartQuantities::new());
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].count, 0);
        assert_eq!(snapshot.items[0].subtotal, "$0.00");
        assert_eq!(snapshot.items[0].price, "$5.00");
        assert!(snapshot.cart_items.is_empty());
        assert_eq!(snapshot.total, "$0.00");
        assert_eq!(snapshot.error_message, None);
    }

    #[test]
    fn cart_quantity_flows_into_items_lines_and_total() {
        let cart: CartQuantities = BTreeMap::from([(ProductId::new(1), 3)]);
        let snapshot = derive_snapshot(&ready(vec![cookies()]), &cart);
        assert_eq!(snapshot.items[0].count, 3);
        assert_eq!(snapshot.items[0].subtotal, "$15.00");
        assert_eq!(snapshot.cart_items.len(), 1);
        assert_eq!(snapshot.cart_items[0].title, "Cookies");
        assert_eq!(snapshot.cart_items[0].count, 3);
        assert_eq!(snapshot.cart_items[0].subtotal, "$15.00");
        assert_eq!(snapshot.total, "$15.00");
    }

    #[test]
    fn cart_entry_without_catalog_product_produces_no_line() {
        let cart: CartQuantities = BTreeMap::from([(ProductId::new(99), 2)]);
        let snapshot = derive_snapshot(&ready(vec![cookies()]), &cart);
        assert!(snapshot.cart_items.is_empty());
        assert_eq!(snapshot.total, "$0.00");
    }

    #[test]
    fn failed_catalog_discards_items_and_carries_message() {
        let cart: CartQuantities = BTreeMap::from([(ProductId::new(1), 3)]);
        let snapshot = derive_snapshot(&CatalogState::Failed(CatalogError::new("timeout")), &cart);
        assert!(!snapshot.is_loading);
        assert!(snapshot.items.is_empty());
        assert!(snapshot.cart_items.is_empty());
        assert_eq!(snapshot.error_message.as_deref(), Some("timeout"));
    }

    #[test]
    fn failed_catalog_without_message_uses_fallback() {
        let snapshot = derive_snapshot(
            &CatalogState::Failed(CatalogError::unspecified()),
            &CartQuantities::new(),
        );
        assert_eq!(snapshot.error_message.as_deref(), Some(DEFAULT_CATALOG_ERROR));
    }

    #[test]
    fn title_lookup_resolves_only_in_ready_state() {
        let id = ProductId::new(1);
        assert_eq!(ready(vec![cookies()]).title_of(id), Some("Cookies"));
        assert_eq!(CatalogState::Idle.title_of(id), None);
        assert_eq!(
            CatalogState::Failed(CatalogError::unspecified()).title_of(id),
            None
        );
    }

    proptest! {
        /// Grand total equals Σ price × quantity over the catalog, with
        /// quantity defaulting to zero for products absent from the cart.
        #[test]
        fn grand_total_matches_catalog_sum(
            prices in prop::collection::btree_map(0_u64..40, 0.01_f64..500.0, 0..12),
            cart_raw in prop::collection::btree_map(0_u64..40, 1_u32..20, 0..12),
        ) {
            let products: Vec<Product> = prices
                .iter()
                .map(|(&id, &price)| Product::new(
                    ProductId::new(id),
                    format!("product-{id}"),
                    price,
                    String::new(),
                    String::new(),
                    String::new(),
                ))
                .collect();
            let cart: CartQuantities = cart_raw
                .into_iter()
                .map(|(id, count)| (ProductId::new(id), count))
                .collect();

            let expected: f64 = products
                .iter()
                .map(|p| p.price * f64::from(cart.get(&p.id).copied().unwrap_or(0)))
                .sum();

            let snapshot = derive_snapshot(&ready(products), &cart);
            prop_assert_eq!(snapshot.total, format_usd(expected));
        }

        /// Cart lines never carry a zero count.
        #[test]
        fn cart_lines_never_zero(
            prices in prop::collection::btree_map(0_u64..40, 0.01_f64..500.0, 0..12),
            cart_raw in prop::collection::btree_map(0_u64..40, 1_u32..20, 0..12),
        ) {
            let products: Vec<Product> = prices
                .iter()
                .map(|(&id, &price)| Product::new(
                    ProductId::new(id),
                    format!("product-{id}"),
                    price,
                    String::new(),
                    String::new(),
                    String::new(),
                ))
                .collect();
            let cart: CartQuantities = cart_raw
                .into_iter()
                .map(|(id, count)| (ProductId::new(id), count))
                .collect();

            let snapshot = derive_snapshot(&ready(products), &cart);
            prop_assert!(snapshot.cart_items.iter().all(|line| line.count >= 1));
        }
    }
}
