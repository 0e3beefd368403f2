//! Trigger surface: turn a "pick a random configuration for me" request into
//! a cart insertion.
//!
//! The handler here is the orchestration shell around the allocator: it
//! parses the triggering request, resolves the bundle through the catalog
//! seam, allocates a random configuration, runs the pluggable validation
//! pipeline and finally hands the configured bundle to the cart seam. All
//! request state is explicit (no ambient globals) and the random source is
//! injected, so the whole path is testable end to end.

pub mod cart;
pub mod error;
pub mod handler;
pub mod request;
pub mod validation;

pub use cart::{Cart, CartItem, InMemoryCart};
pub use error::CartError;
pub use handler::{Outcome, RandomPickHandler, RedirectPolicy};
pub use request::{RandomPickRequest, RequestId};
pub use validation::{ContainerSizeValidation, Validation, ValidationContext};
