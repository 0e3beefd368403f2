//! Bundle and child-item snapshot types.

use serde::{Deserialize, Serialize};

use mixmatch_core::{ChildItemKey, ProductId, QuantityRule, VariationId};

/// One selectable constituent of a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildItem {
    pub product_id: ProductId,
    pub variation_id: Option<VariationId>,
    pub in_stock: bool,
    #[serde(default)]
    pub rule: QuantityRule,
}

impl ChildItem {
    pub fn new(product_id: ProductId, rule: QuantityRule) -> Self {
        Self {
            product_id,
            variation_id: None,
            in_stock: true,
            rule,
        }
    }

    pub fn with_variation(mut self, variation_id: VariationId) -> Self {
        self.variation_id = Some(variation_id);
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Identity of this item: variation id when present, product id otherwise.
    pub fn key(&self) -> ChildItemKey {
        ChildItemKey::resolve(self.product_id, self.variation_id)
    }
}

/// A bundle product: overall container-size bounds plus its child items, in
/// catalog order. Order matters: the allocator walks the items in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub product_id: ProductId,
    pub min_container_size: u64,
    #[serde(default)]
    pub max_container_size: Option<u64>,
    pub child_items: Vec<ChildItem>,
}

impl Bundle {
    pub fn new(
        product_id: ProductId,
        min_container_size: u64,
        max_container_size: Option<u64>,
        child_items: Vec<ChildItem>,
    ) -> Self {
        Self {
            product_id,
            min_container_size,
            max_container_size,
            child_items,
        }
    }

    pub fn child_items(&self) -> &[ChildItem] {
        &self.child_items
    }
}
