//! Catalog resolution seam.

use std::collections::HashMap;

use mixmatch_core::ProductId;

use crate::bundle::Bundle;

/// Resolves a numeric product id into a bundle snapshot.
///
/// Returning `None` means the product does not exist **or** is not a
/// bundle-type product; callers treat both the same way (the request is simply
/// not for us).
pub trait CatalogProvider {
    fn bundle(&self, product_id: ProductId) -> Option<Bundle>;
}

/// In-memory catalog, for tests and benches.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    bundles: HashMap<ProductId, Bundle>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bundle: Bundle) {
        self.bundles.insert(bundle.product_id, bundle);
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn bundle(&self, product_id: ProductId) -> Option<Bundle> {
        self.bundles.get(&product_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixmatch_core::QuantityRule;

    use crate::bundle::ChildItem;

    #[test]
    fn resolves_inserted_bundle() {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert(Bundle::new(
            ProductId::new(5),
            1,
            Some(3),
            vec![ChildItem::new(ProductId::new(50), QuantityRule::any())],
        ));

        let bundle = catalog.bundle(ProductId::new(5)).unwrap();
        assert_eq!(bundle.product_id, ProductId::new(5));
        assert!(catalog.bundle(ProductId::new(6)).is_none());
    }
}
