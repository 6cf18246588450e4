//! Wire representation of the remote product listing.

use serde::Deserialize;
use storefront_core::{Product, ProductId};

/// One product as delivered by the remote listing endpoint.
///
/// Kept separate from the domain [`Product`] so the wire schema can drift
/// without touching the rest of the workspace.
#[derive(Clone, Debug, Deserialize)]
pub struct ProductDto {
    /// Unique identifier
    pub id: u64,
    /// Display title
    pub title: String,
    /// Unit price
    pub price: f64,
    /// Display description
    pub description: String,
    /// Category label
    pub category: String,
    /// Image URL
    pub image: String,
}

impl ProductDto {
    /// Convert into the domain product type.
    #[must_use]
    pub fn into_domain(self) -> Product {
        Product::new(
            ProductId::new(self.id),
            self.title,
            self.price,
            self.description,
            self.category,
            self.image,
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    #[test]
    fn decodes_listing_entry() {
        let json = r#"{
            "id": 1,
            "title": "Mock T-Shirt",
            "price": 19.99,
            "description": "A fake product for testing",
            "category": "clothing",
            "image": "https://example.com/mock-tshirt.jpg"
        }"#;
        let dto: ProductDto = serde_json::from_str(json).unwrap();
        let product = dto.into_domain();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.title, "Mock T-Shirt");
        assert!((product.price - 19.99).abs() < f64::EPSILON);
        assert_eq!(product.category, "clothing");
    }

    #[test]
    fn rejects_entry_missing_fields() {
        let json = r#"{ "id": 1, "title": "No price" }"#;
        assert!(serde_json::from_str::<ProductDto>(json).is_err());
    }
}
