//! Catalog source fakes.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};
use storefront_core::{CatalogError, CatalogSource, Product};

/// Catalog source whose every fetch fails.
#[derive(Clone, Debug)]
pub struct FailingCatalog {
    message: Option<String>,
}

impl FailingCatalog {
    /// Fail with the given message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Fail without a message, exercising the display fallback.
    #[must_use]
    pub const fn unspecified() -> Self {
        Self { message: None }
    }
}

impl CatalogSource for FailingCatalog {
    fn fetch_all(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Product>, CatalogError>> + Send + '_>> {
        let error = self
            .message
            .as_ref()
            .map_or_else(CatalogError::unspecified, CatalogError::new);
        Box::pin(async move { Err(error) })
    }
}

/// Catalog source that plays back a queued sequence of fetch results.
///
/// Each fetch pops the next scripted result; once the script is
/// exhausted, fetches fail. Useful for testing explicit re-triggered
/// refreshes (e.g. failure followed by success).
#[derive(Debug)]
pub struct ScriptedCatalog {
    script: Mutex<VecDeque<Result<Vec<Product>, CatalogError>>>,
}

impl ScriptedCatalog {
    /// Create a source that serves the given results in order.
    #[must_use]
    pub fn new(results: Vec<Result<Vec<Product>, CatalogError>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
        }
    }
}

impl CatalogSource for ScriptedCatalog {
    fn fetch_all(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Product>, CatalogError>> + Send + '_>> {
        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(CatalogError::new("catalog script exhausted")));
        Box::pin(async move { next })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use futures::executor::block_on;

    #[test]
    fn failing_catalog_carries_message() {
        let catalog = FailingCatalog::with_message("timeout");
        let error = block_on(catalog.fetch_all()).unwrap_err();
        assert_eq!(error.message(), Some("timeout"));

        let silent = FailingCatalog::unspecified();
        assert_eq!(block_on(silent.fetch_all()).unwrap_err().message(), None);
    }

    #[test]
    fn scripted_catalog_plays_results_in_order() {
        let catalog = ScriptedCatalog::new(vec![
            Err(CatalogError::new("first")),
            Ok(vec![]),
        ]);
        assert!(block_on(catalog.fetch_all()).is_err());
        assert!(block_on(catalog.fetch_all()).is_ok());
        // Script exhausted
        assert!(block_on(catalog.fetch_all()).is_err());
    }
}
