//! # Storefront Runtime
//!
//! Runtime for a single cart session: the machinery that turns an
//! asynchronously-loaded catalog and a persisted cart into a continuously
//! current, presentation-ready view.
//!
//! ## Core Components
//!
//! - **[`CartSession`]**: wires one catalog source and one cart store into
//!   a running session and is the only public entry point
//! - **Aggregator** ([`aggregate`]): combine-latest subscriber over the
//!   catalog and cart channels; recomputes the whole [`ViewSnapshot`] on
//!   every upstream change
//! - **Intent worker** ([`intents`]): single logical worker draining a
//!   single-slot mailbox with latest-wins semantics; the only write path
//!   into the cart store
//! - **[`ViewStatePublisher`]** ([`publisher`]): holds the one current
//!   snapshot and the one-shot notification channel
//! - **[`MemoryCartStore`]** ([`memory_store`]): the prototype's in-memory
//!   cart store implementation
//!
//! ## Example
//!
//! ```ignore
//! use storefront_runtime::CartSession;
//!
//! let session = CartSession::start(catalog, store);
//!
//! // Observe derived state
//! let mut snapshots = session.subscribe();
//!
//! // React to a user tap
//! session.submit(QuantityIntent::increase(product_id));
//! ```
//!
//! [`ViewSnapshot`]: storefront_core::ViewSnapshot

pub mod aggregate;
pub mod intents;
pub mod memory_store;
pub mod publisher;

mod session;

pub use aggregate::{derive_snapshot, CatalogState};
pub use intents::{FailedIntent, FailedIntents};
pub use memory_store::MemoryCartStore;
pub use publisher::ViewStatePublisher;
pub use session::{CartSession, SessionConfig};
