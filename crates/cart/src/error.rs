//! Cart-layer error model.

use thiserror::Error;

/// Failures crossing the cart boundary.
///
/// Note what is NOT here: a bad triggering request and a non-bundle product
/// are no-ops (the handler returns [`crate::Outcome::NotHandled`]), and a
/// failed validation is a rejected outcome, not an error. Only genuine cart
/// integration failures surface as `Err`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The cart backend refused the item.
    #[error("cart insertion failed: {0}")]
    Insertion(String),
}

impl CartError {
    pub fn insertion(msg: impl Into<String>) -> Self {
        Self::Insertion(msg.into())
    }
}
