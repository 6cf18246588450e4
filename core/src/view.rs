//! Derived, presentation-ready view types.
//!
//! Everything in this module is a read-only projection of
//! (catalog snapshot, cart mapping). View values are recomputed whole on
//! every upstream change and published atomically, never patched in place.

use crate::money::format_usd;
use crate::product::ProductId;

/// Fallback display title used when a removed product cannot be resolved in
/// the latest catalog.
pub const FALLBACK_ITEM_TITLE: &str = "Item";

/// One derived row per catalog product, in catalog order.
///
/// Carries the product's display fields plus its current cart quantity
/// (zero when the product is absent from the cart) and formatted subtotal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreItemView {
    /// The product this row displays.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Category label.
    pub category: String,
    /// Image reference.
    pub image: String,
    /// Formatted unit price, e.g. `"$19.99"`.
    pub price: String,
    /// Current cart quantity; zero when absent from the cart.
    pub count: u32,
    /// Formatted `count × unit price`, e.g. `"$39.98"`.
    pub subtotal: String,
}

/// One derived row per product present in the cart (quantity ≥ 1), in cart
/// order.
///
/// A cart line never carries a zero count: products at quantity zero are
/// absent from the cart entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartLineView {
    /// The product in the cart.
    pub product_id: ProductId,
    /// Display title.
    pub title: String,
    /// Formatted unit price.
    pub unit_price: String,
    /// Cart quantity, always ≥ 1.
    pub count: u32,
    /// Formatted `count × unit price`.
    pub subtotal: String,
}

/// One complete, consistent derived view of catalog + cart.
///
/// Exactly one snapshot is current at any time; every recomputation
/// replaces the whole snapshot atomically.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSnapshot {
    /// Whether a catalog load is in flight.
    pub is_loading: bool,
    /// One row per catalog product, catalog order preserved.
    pub items: Vec<StoreItemView>,
    /// One row per product in the cart, cart order.
    pub cart_items: Vec<CartLineView>,
    /// Formatted grand total over all products.
    pub total: String,
    /// Message from the latest failed catalog fetch, if the latest fetch
    /// failed.
    pub error_message: Option<String>,
}

impl Default for ViewSnapshot {
    fn default() -> Self {
        Self {
            is_loading: false,
            items: Vec::new(),
            cart_items: Vec::new(),
            total: format_usd(0.0),
            error_message: None,
        }
    }
}

/// A one-shot transient message, distinct from persistent view state.
///
/// Notifications are delivered at most once and are not part of the
/// snapshot: consuming one does not perturb the current view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    message: String,
}

impl Notification {
    /// The removal notification emitted when a decrement drives a product's
    /// quantity below one.
    #[must_use]
    pub fn removed_from_cart(title: &str) -> Self {
        Self {
            message: format!("{title} removed from cart"),
        }
    }

    /// The display message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
