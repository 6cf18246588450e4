//! Catalog source contract.
//!
//! The catalog is fetched as a whole: a successful fetch replaces any
//! previous snapshot entirely (this is a prototype feed, not a delta sync).
//! Fetching is invoked once at session start and may be re-invoked on
//! demand; failures are recoverable and surface as an error message in the
//! derived snapshot.

use crate::product::Product;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Fallback message shown when a catalog failure carries no message of its
/// own.
pub const DEFAULT_CATALOG_ERROR: &str = "Unable to load Products";

/// Error produced by a failed catalog fetch.
///
/// Carries an optional human-readable message taken from the underlying
/// transport or decode failure. Consumers that need display text should use
/// [`CatalogError::display_message`], which falls back to
/// [`DEFAULT_CATALOG_ERROR`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("catalog fetch failed: {}", self.display_message())]
pub struct CatalogError {
    message: Option<String>,
}

impl CatalogError {
    /// Create an error with a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Create an error with no message (the display fallback applies).
    #[must_use]
    pub const fn unspecified() -> Self {
        Self { message: None }
    }

    /// The message supplied by the failure, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The message to display to a user, falling back to
    /// [`DEFAULT_CATALOG_ERROR`].
    #[must_use]
    pub fn display_message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_CATALOG_ERROR)
    }
}

/// A source of full catalog snapshots.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `async fn` so implementations can be held as `Arc<dyn CatalogSource>`
/// and captured by spawned tasks.
pub trait CatalogSource: Send + Sync {
    /// Fetch the full product catalog.
    ///
    /// A successful result replaces any previously fetched snapshot
    /// entirely.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on network or decode failure. The error is
    /// recoverable; fetching may be retried by re-invoking this method.
    fn fetch_all(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Product>, CatalogError>> + Send + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_message_prefers_supplied_message() {
        let err = CatalogError::new("timeout");
        assert_eq!(err.message(), Some("timeout"));
        assert_eq!(err.display_message(), "timeout");
    }

    #[test]
    fn display_message_falls_back_when_unspecified() {
        let err = CatalogError::unspecified();
        assert_eq!(err.message(), None);
        assert_eq!(err.display_message(), DEFAULT_CATALOG_ERROR);
    }
}
