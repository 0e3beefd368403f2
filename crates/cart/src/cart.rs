//! Cart insertion seam.

use serde::{Deserialize, Serialize};

use mixmatch_allocation::AllocationResult;
use mixmatch_core::ProductId;

use crate::error::CartError;

/// What gets added to the cart: the parent bundle product at the outer
/// quantity, with the allocated configuration attached as item metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u64,
    pub configuration: AllocationResult,
}

/// The external cart/order system boundary.
pub trait Cart {
    fn add(&mut self, item: CartItem) -> Result<(), CartError>;
}

/// In-memory cart, for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCart {
    items: Vec<CartItem>,
    refuse_all: bool,
}

impl InMemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cart that refuses every insertion, to exercise the failure path.
    pub fn refusing() -> Self {
        Self {
            items: Vec::new(),
            refuse_all: true,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}

impl Cart for InMemoryCart {
    fn add(&mut self, item: CartItem) -> Result<(), CartError> {
        if self.refuse_all {
            return Err(CartError::insertion("cart is refusing insertions"));
        }
        self.items.push(item);
        Ok(())
    }
}
