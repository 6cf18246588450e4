//! Remote HTTP catalog source.

use crate::dto::ProductDto;
use std::future::Future;
use std::pin::Pin;
use storefront_core::{CatalogError, CatalogSource, Product};

/// Base URL of the public prototype listing.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Catalog source backed by a remote JSON product listing.
///
/// Fetches `GET {base_url}/products` and decodes the body into domain
/// products. Network, status and decode failures all map to a recoverable
/// [`CatalogError`] carrying the transport error's message.
#[derive(Clone, Debug)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Create a catalog source against the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a catalog source with a caller-configured HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn listing_url(&self) -> String {
        format!("{}/products", self.base_url.trim_end_matches('/'))
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CatalogSource for HttpCatalog {
    fn fetch_all(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Product>, CatalogError>> + Send + '_>> {
        Box::pin(async move {
            let url = self.listing_url();
            tracing::debug!(url, "fetching catalog");

            let dtos: Vec<ProductDto> = self
                .client
                .get(&url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(to_catalog_error)?
                .json()
                .await
                .map_err(to_catalog_error)?;

            tracing::debug!(products = dtos.len(), "catalog fetched");
            Ok(dtos.into_iter().map(ProductDto::into_domain).collect())
        })
    }
}

fn to_catalog_error(error: reqwest::Error) -> CatalogError {
    CatalogError::new(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_url_tolerates_trailing_slash() {
        let plain = HttpCatalog::new("https://example.com");
        let slashed = HttpCatalog::new("https://example.com/");
        assert_eq!(plain.listing_url(), "https://example.com/products");
        assert_eq!(slashed.listing_url(), "https://example.com/products");
    }
}
