//! Fixed in-process catalog source.

use std::future::Future;
use std::pin::Pin;
use storefront_core::{CatalogError, CatalogSource, Product, ProductId};

/// Catalog source that always serves the same product list.
///
/// Stands in for the remote listing during offline development; every
/// fetch succeeds and returns a clone of the configured list.
#[derive(Clone, Debug)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Create a source serving the given products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The two-product sample listing used by the prototype.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(vec![
            Product::new(
                ProductId::new(1),
                "Mock T-Shirt".to_owned(),
                19.99,
                "A fake product for testing".to_owned(),
                "clothing".to_owned(),
                "https://example.com/mock-tshirt.jpg".to_owned(),
            ),
            Product::new(
                ProductId::new(2),
                "Mock Watch".to_owned(),
                99.99,
                "Another fake item".to_owned(),
                "accessories".to_owned(),
                "https://example.com/mock-watch.jpg".to_owned(),
            ),
        ])
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch_all(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Product>, CatalogError>> + Send + '_>> {
        Box::pin(async move { Ok(self.products.clone()) })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use futures::executor::block_on;

    #[test]
    fn serves_configured_products() {
        let catalog = StaticCatalog::sample();
        let products = block_on(catalog.fetch_all()).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Mock T-Shirt");
        assert_eq!(products[1].id, ProductId::new(2));
    }
}
