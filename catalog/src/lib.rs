//! # Storefront Catalog
//!
//! Catalog source adapters for the storefront cart engine.
//!
//! - [`HttpCatalog`]: fetches the product listing from a remote JSON
//!   endpoint (the workspace's only network-facing component)
//! - [`StaticCatalog`]: serves a fixed in-process product list, useful for
//!   offline development and deterministic tests
//!
//! Both implement the [`CatalogSource`] contract from `storefront-core`:
//! a fetch returns the full catalog or a recoverable [`CatalogError`], and
//! a successful fetch replaces any previous snapshot entirely.
//!
//! [`CatalogSource`]: storefront_core::CatalogSource
//! [`CatalogError`]: storefront_core::CatalogError

mod dto;
mod http;
mod static_source;

pub use dto::ProductDto;
pub use http::{HttpCatalog, DEFAULT_BASE_URL};
pub use static_source::StaticCatalog;
