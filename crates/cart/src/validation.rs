//! Pluggable validation pipeline.
//!
//! The original system exposes add-to-cart validation as a filter chain any
//! extension can hook into. Here that extension point is an explicit trait:
//! callers register validations with the handler, and the first failure
//! rejects the whole request before anything touches the cart.

use anyhow::{bail, Result};

use mixmatch_allocation::AllocationResult;
use mixmatch_catalog::Bundle;
use mixmatch_core::ProductId;

use crate::request::RequestId;

/// Everything a validation gets to look at before the cart insertion.
#[derive(Debug)]
pub struct ValidationContext<'a> {
    pub request_id: RequestId,
    pub product_id: ProductId,
    /// Outer quantity (number of configured bundles being added).
    pub quantity: u64,
    pub bundle: &'a Bundle,
    pub configuration: &'a AllocationResult,
}

/// One registered validation. Return `Err` to reject the request; the error's
/// message becomes the rejection reason.
pub trait Validation {
    fn validate(&self, ctx: &ValidationContext<'_>) -> Result<()>;
}

impl<F> Validation for F
where
    F: Fn(&ValidationContext<'_>) -> Result<()>,
{
    fn validate(&self, ctx: &ValidationContext<'_>) -> Result<()> {
        self(ctx)
    }
}

/// Rejects configurations whose total falls outside the bundle's container
/// bounds. This is the business rule that catches an empty allocation (all
/// child items out of stock) on a bundle with a positive minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerSizeValidation;

impl Validation for ContainerSizeValidation {
    fn validate(&self, ctx: &ValidationContext<'_>) -> Result<()> {
        let total = ctx.configuration.total_quantity();
        let min = ctx.bundle.min_container_size;
        if total < min {
            bail!("configuration holds {total} items, below the container minimum of {min}");
        }
        if let Some(max) = ctx.bundle.max_container_size {
            if total > max {
                bail!("configuration holds {total} items, above the container maximum of {max}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixmatch_allocation::{RandomAllocator, ScriptedRng};
    use mixmatch_catalog::ChildItem;
    use mixmatch_core::QuantityRule;

    fn ctx_parts(bundle: &Bundle) -> (RequestId, AllocationResult) {
        let config = RandomAllocator::new().allocate(bundle, &mut ScriptedRng::always_min());
        (RequestId::new(), config)
    }

    #[test]
    fn container_size_validation_accepts_full_configuration() {
        let bundle = Bundle::new(
            ProductId::new(1),
            2,
            Some(4),
            vec![
                ChildItem::new(ProductId::new(11), QuantityRule::any()),
                ChildItem::new(ProductId::new(12), QuantityRule::any()),
            ],
        );
        let (request_id, config) = ctx_parts(&bundle);
        let ctx = ValidationContext {
            request_id,
            product_id: bundle.product_id,
            quantity: 1,
            bundle: &bundle,
            configuration: &config,
        };
        assert!(ContainerSizeValidation.validate(&ctx).is_ok());
    }

    #[test]
    fn container_size_validation_rejects_empty_configuration() {
        let bundle = Bundle::new(
            ProductId::new(1),
            2,
            Some(4),
            vec![
                ChildItem::new(ProductId::new(11), QuantityRule::any()).out_of_stock(),
                ChildItem::new(ProductId::new(12), QuantityRule::any()).out_of_stock(),
            ],
        );
        let (request_id, config) = ctx_parts(&bundle);
        assert!(config.is_empty());

        let ctx = ValidationContext {
            request_id,
            product_id: bundle.product_id,
            quantity: 1,
            bundle: &bundle,
            configuration: &config,
        };
        let err = ContainerSizeValidation.validate(&ctx).unwrap_err();
        assert!(err.to_string().contains("below the container minimum"));
    }

    #[test]
    fn closures_work_as_validations() {
        let bundle = Bundle::new(ProductId::new(1), 0, None, vec![]);
        let (request_id, config) = ctx_parts(&bundle);
        let ctx = ValidationContext {
            request_id,
            product_id: bundle.product_id,
            quantity: 1,
            bundle: &bundle,
            configuration: &config,
        };

        let reject_everything =
            |_: &ValidationContext<'_>| -> Result<()> { bail!("business says no") };
        let err = reject_everything.validate(&ctx).unwrap_err();
        assert_eq!(err.to_string(), "business says no");
    }
}
