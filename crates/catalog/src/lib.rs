//! Catalog snapshot types for bundle products.
//!
//! This crate contains the data shapes crossing the boundary from the product
//! catalog into the allocator: a bundle with container-size bounds and an
//! ordered list of child items, each carrying its own stock flag and quantity
//! rule. Everything here is a plain per-request snapshot (no storage, no IO).

pub mod bundle;
pub mod provider;

pub use bundle::{Bundle, ChildItem};
pub use provider::{CatalogProvider, InMemoryCatalog};
