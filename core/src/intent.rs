//! User intents.
//!
//! An intent is a user-originated request to change a cart quantity. Intents
//! flow from the presentation layer into the session's intent worker, which
//! serializes them against the cart store.

use crate::product::ProductId;

/// Which way a quantity change goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Add one to the current quantity.
    Increase,
    /// Subtract one from the current quantity.
    Decrease,
}

impl Direction {
    /// The signed delta this direction applies to a quantity.
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Increase => 1,
            Self::Decrease => -1,
        }
    }
}

/// A request to change the quantity of one product by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantityIntent {
    /// The product whose quantity changes.
    pub product_id: ProductId,
    /// Which way the quantity changes.
    pub direction: Direction,
}

impl QuantityIntent {
    /// An intent to increase a product's quantity by one.
    #[must_use]
    pub const fn increase(product_id: ProductId) -> Self {
        Self {
            product_id,
            direction: Direction::Increase,
        }
    }

    /// An intent to decrease a product's quantity by one.
    #[must_use]
    pub const fn decrease(product_id: ProductId) -> Self {
        Self {
            product_id,
            direction: Direction::Decrease,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_unit_steps() {
        assert_eq!(Direction::Increase.delta(), 1);
        assert_eq!(Direction::Decrease.delta(), -1);
    }

    #[test]
    fn constructors_set_direction() {
        let id = ProductId::new(3);
        assert_eq!(
            QuantityIntent::increase(id),
            QuantityIntent {
                product_id: id,
                direction: Direction::Increase
            }
        );
        assert_eq!(QuantityIntent::decrease(id).direction, Direction::Decrease);
    }
}
