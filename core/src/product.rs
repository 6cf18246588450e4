//! Catalog product types.
//!
//! A [`Product`] is an immutable catalog entry: it is created when a catalog
//! snapshot is fetched, never mutated, and dropped wholesale when a fresh
//! snapshot replaces the previous one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, stable identifier for a catalog product.
///
/// # Design
///
/// `ProductId` is a newtype wrapper around `u64` that provides:
/// - Type safety (can't accidentally use a bare integer)
/// - Clear intent in function signatures
/// - A stable ordering, used for deterministic cart-line ordering
///
/// # Examples
///
/// ```
/// use storefront_core::ProductId;
///
/// let id = ProductId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Create a new `ProductId`.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable catalog entry.
///
/// Products carry the display fields delivered by the remote product listing.
/// The unit price is a non-negative decimal amount in the catalog currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identifier
    pub id: ProductId,
    /// Display title
    pub title: String,
    /// Unit price (non-negative)
    pub price: f64,
    /// Longer display description
    pub description: String,
    /// Category the product is listed under
    pub category: String,
    /// Image reference (URL)
    pub image: String,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub const fn new(
        id: ProductId,
        title: String,
        price: f64,
        description: String,
        category: String,
        image: String,
    ) -> Self {
        Self {
            id,
            title,
            price,
            description,
            category,
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_ordering_follows_value() {
        assert!(ProductId::new(1) < ProductId::new(2));
        assert_eq!(ProductId::from(7), ProductId::new(7));
    }

    #[test]
    fn product_id_display() {
        assert_eq!(format!("{}", ProductId::new(19)), "19");
    }
}
