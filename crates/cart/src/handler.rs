//! The random-pick request handler.

use mixmatch_allocation::{QuantityRng, RandomAllocator};
use mixmatch_catalog::CatalogProvider;
use mixmatch_core::ProductId;

use crate::cart::{Cart, CartItem};
use crate::error::CartError;
use crate::request::{RandomPickRequest, RequestId};
use crate::validation::{Validation, ValidationContext};

/// Where to send the user after a successful add.
///
/// An explicit override (the original exposes this as a filter on the
/// redirect URL) wins over the site-wide "redirect to cart after add"
/// option; with neither set the user stays put.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectPolicy {
    pub override_url: Option<String>,
    pub after_add_url: Option<String>,
}

impl RedirectPolicy {
    pub fn none() -> Self {
        Self::default()
    }

    fn resolve(&self) -> Option<String> {
        self.override_url
            .clone()
            .or_else(|| self.after_add_url.clone())
    }
}

/// What handling a request came to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The request was not for us: no numeric product id, or the product is
    /// not a bundle. Nothing happened.
    NotHandled,
    /// A configuration was allocated but a validation refused it. Nothing
    /// was added to the cart.
    Rejected {
        request_id: RequestId,
        reason: String,
    },
    /// The configured bundle is in the cart.
    Added {
        request_id: RequestId,
        product_id: ProductId,
        quantity: u64,
        total_quantity: u64,
        redirect: Option<String>,
    },
}

/// Orchestrates one random-pick request end to end: parse, resolve the
/// bundle, allocate, validate, insert, decide the redirect.
pub struct RandomPickHandler<C, K, R> {
    catalog: C,
    cart: K,
    rng: R,
    allocator: RandomAllocator,
    validations: Vec<Box<dyn Validation>>,
    redirect: RedirectPolicy,
}

impl<C, K, R> RandomPickHandler<C, K, R>
where
    C: CatalogProvider,
    K: Cart,
    R: QuantityRng,
{
    pub fn new(catalog: C, cart: K, rng: R) -> Self {
        Self {
            catalog,
            cart,
            rng,
            allocator: RandomAllocator::new(),
            validations: Vec::new(),
            redirect: RedirectPolicy::none(),
        }
    }

    pub fn with_validation(mut self, validation: impl Validation + 'static) -> Self {
        self.validations.push(Box::new(validation));
        self
    }

    pub fn with_redirect_policy(mut self, redirect: RedirectPolicy) -> Self {
        self.redirect = redirect;
        self
    }

    pub fn cart(&self) -> &K {
        &self.cart
    }

    pub fn handle(&mut self, request: &RandomPickRequest) -> Result<Outcome, CartError> {
        let Some(product_id) = request.product_id() else {
            tracing::debug!("random pick request without a numeric product id, ignoring");
            return Ok(Outcome::NotHandled);
        };

        let Some(bundle) = self.catalog.bundle(product_id) else {
            tracing::debug!("product {} is not a bundle, ignoring", product_id);
            return Ok(Outcome::NotHandled);
        };

        let request_id = RequestId::new();
        let quantity = request.outer_quantity();

        let configuration = self.allocator.allocate(&bundle, &mut self.rng);
        tracing::debug!(
            "request {}: allocated {} items across {} lines for product {}",
            request_id,
            configuration.total_quantity(),
            configuration.lines().len(),
            product_id
        );

        let ctx = ValidationContext {
            request_id,
            product_id,
            quantity,
            bundle: &bundle,
            configuration: &configuration,
        };
        for validation in &self.validations {
            if let Err(reason) = validation.validate(&ctx) {
                tracing::warn!(
                    "request {}: configuration for product {} rejected: {}",
                    request_id,
                    product_id,
                    reason
                );
                return Ok(Outcome::Rejected {
                    request_id,
                    reason: reason.to_string(),
                });
            }
        }

        let total_quantity = configuration.total_quantity();
        self.cart.add(CartItem {
            product_id,
            quantity,
            configuration,
        })?;
        tracing::info!(
            "request {}: added product {} x{} to cart ({} child items)",
            request_id,
            product_id,
            quantity,
            total_quantity
        );

        Ok(Outcome::Added {
            request_id,
            product_id,
            quantity,
            total_quantity,
            redirect: self.redirect.resolve(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    use mixmatch_allocation::{ScriptedRng, SeededRng};
    use mixmatch_catalog::{Bundle, ChildItem, InMemoryCatalog};
    use mixmatch_core::{ChildItemKey, QuantityRule};

    use crate::cart::InMemoryCart;
    use crate::validation::ContainerSizeValidation;

    fn two_item_bundle(product_id: u64) -> Bundle {
        Bundle::new(
            ProductId::new(product_id),
            2,
            Some(4),
            vec![
                ChildItem::new(ProductId::new(11), QuantityRule::any()),
                ChildItem::new(ProductId::new(12), QuantityRule::any()),
            ],
        )
    }

    fn catalog_with(bundle: Bundle) -> InMemoryCatalog {
        // Idempotent; lets RUST_LOG surface handler logs during test runs.
        mixmatch_observability::init();

        let mut catalog = InMemoryCatalog::new();
        catalog.insert(bundle);
        catalog
    }

    #[test]
    fn missing_product_id_is_not_handled() {
        let catalog = catalog_with(two_item_bundle(5));
        let mut handler =
            RandomPickHandler::new(catalog, InMemoryCart::new(), ScriptedRng::always_min());

        let outcome = handler.handle(&RandomPickRequest::empty()).unwrap();
        assert_eq!(outcome, Outcome::NotHandled);
        assert!(handler.cart().items().is_empty());
    }

    #[test]
    fn non_numeric_product_id_is_not_handled() {
        let catalog = catalog_with(two_item_bundle(5));
        let mut handler =
            RandomPickHandler::new(catalog, InMemoryCart::new(), ScriptedRng::always_min());

        let outcome = handler.handle(&RandomPickRequest::new("5; DROP")).unwrap();
        assert_eq!(outcome, Outcome::NotHandled);
        assert!(handler.cart().items().is_empty());
    }

    #[test]
    fn non_bundle_product_is_not_handled() {
        let catalog = catalog_with(two_item_bundle(5));
        let mut handler =
            RandomPickHandler::new(catalog, InMemoryCart::new(), ScriptedRng::always_min());

        // Product 99 exists nowhere in the catalog.
        let outcome = handler.handle(&RandomPickRequest::new("99")).unwrap();
        assert_eq!(outcome, Outcome::NotHandled);
    }

    #[test]
    fn adds_configured_bundle_to_cart() {
        let catalog = catalog_with(two_item_bundle(5));
        let mut handler = RandomPickHandler::new(
            catalog,
            InMemoryCart::new(),
            SeededRng::seed_from_u64(7),
        )
        .with_validation(ContainerSizeValidation);

        let outcome = handler.handle(&RandomPickRequest::new("5")).unwrap();
        match outcome {
            Outcome::Added {
                product_id,
                quantity,
                total_quantity,
                redirect,
                ..
            } => {
                assert_eq!(product_id, ProductId::new(5));
                assert_eq!(quantity, 1); // default outer quantity
                assert_eq!(total_quantity, 3); // midpoint of 2..4
                assert_eq!(redirect, None);
            }
            other => panic!("Expected Added outcome, got {other:?}"),
        }

        let items = handler.cart().items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, ProductId::new(5));
        assert_eq!(items[0].configuration.total_quantity(), 3);
        // Fair-share floor guarantees both children appear.
        assert!(items[0].configuration.get(ChildItemKey::new(11)).is_some());
        assert!(items[0].configuration.get(ChildItemKey::new(12)).is_some());
    }

    #[test]
    fn outer_quantity_is_carried_through() {
        let catalog = catalog_with(two_item_bundle(5));
        let mut handler = RandomPickHandler::new(
            catalog,
            InMemoryCart::new(),
            SeededRng::seed_from_u64(7),
        );

        let request = RandomPickRequest::new("5").with_quantity(3);
        let outcome = handler.handle(&request).unwrap();
        match outcome {
            Outcome::Added { quantity, .. } => assert_eq!(quantity, 3),
            other => panic!("Expected Added outcome, got {other:?}"),
        }
        assert_eq!(handler.cart().items()[0].quantity, 3);
    }

    #[test]
    fn validation_failure_rejects_without_touching_the_cart() {
        let catalog = catalog_with(two_item_bundle(5));
        let reject = |_: &ValidationContext<'_>| -> anyhow::Result<()> {
            bail!("no bundles on weekends")
        };
        let mut handler = RandomPickHandler::new(
            catalog,
            InMemoryCart::new(),
            SeededRng::seed_from_u64(7),
        )
        .with_validation(reject);

        let outcome = handler.handle(&RandomPickRequest::new("5")).unwrap();
        match outcome {
            Outcome::Rejected { reason, .. } => {
                assert_eq!(reason, "no bundles on weekends");
            }
            other => panic!("Expected Rejected outcome, got {other:?}"),
        }
        assert!(handler.cart().items().is_empty());
    }

    #[test]
    fn empty_allocation_is_rejected_downstream() {
        // Every child item out of stock: the allocator returns an empty but
        // well-formed configuration, and the container-size validation is
        // what rejects it.
        let bundle = Bundle::new(
            ProductId::new(5),
            2,
            Some(4),
            vec![
                ChildItem::new(ProductId::new(11), QuantityRule::any()).out_of_stock(),
                ChildItem::new(ProductId::new(12), QuantityRule::any()).out_of_stock(),
            ],
        );
        let mut handler = RandomPickHandler::new(
            catalog_with(bundle),
            InMemoryCart::new(),
            SeededRng::seed_from_u64(7),
        )
        .with_validation(ContainerSizeValidation);

        let outcome = handler.handle(&RandomPickRequest::new("5")).unwrap();
        match outcome {
            Outcome::Rejected { reason, .. } => {
                assert!(reason.contains("below the container minimum"));
            }
            other => panic!("Expected Rejected outcome, got {other:?}"),
        }
        assert!(handler.cart().items().is_empty());
    }

    #[test]
    fn cart_refusal_surfaces_as_error() {
        let catalog = catalog_with(two_item_bundle(5));
        let mut handler = RandomPickHandler::new(
            catalog,
            InMemoryCart::refusing(),
            SeededRng::seed_from_u64(7),
        );

        let err = handler.handle(&RandomPickRequest::new("5")).unwrap_err();
        match err {
            CartError::Insertion(msg) => assert!(msg.contains("refusing")),
        }
    }

    #[test]
    fn redirect_override_wins_over_after_add_url() {
        let catalog = catalog_with(two_item_bundle(5));
        let mut handler = RandomPickHandler::new(
            catalog,
            InMemoryCart::new(),
            SeededRng::seed_from_u64(7),
        )
        .with_redirect_policy(RedirectPolicy {
            override_url: Some("/bundles/thanks".to_string()),
            after_add_url: Some("/cart".to_string()),
        });

        let outcome = handler.handle(&RandomPickRequest::new("5")).unwrap();
        match outcome {
            Outcome::Added { redirect, .. } => {
                assert_eq!(redirect.as_deref(), Some("/bundles/thanks"));
            }
            other => panic!("Expected Added outcome, got {other:?}"),
        }
    }

    #[test]
    fn redirect_falls_back_to_after_add_url() {
        let catalog = catalog_with(two_item_bundle(5));
        let mut handler = RandomPickHandler::new(
            catalog,
            InMemoryCart::new(),
            SeededRng::seed_from_u64(7),
        )
        .with_redirect_policy(RedirectPolicy {
            override_url: None,
            after_add_url: Some("/cart".to_string()),
        });

        let outcome = handler.handle(&RandomPickRequest::new("5")).unwrap();
        match outcome {
            Outcome::Added { redirect, .. } => assert_eq!(redirect.as_deref(), Some("/cart")),
            other => panic!("Expected Added outcome, got {other:?}"),
        }
    }

    #[test]
    fn cart_item_metadata_serializes_the_configuration() {
        let catalog = catalog_with(two_item_bundle(5));
        let mut handler = RandomPickHandler::new(
            catalog,
            InMemoryCart::new(),
            SeededRng::seed_from_u64(7),
        );

        handler.handle(&RandomPickRequest::new("5")).unwrap();
        let json = serde_json::to_value(&handler.cart().items()[0]).unwrap();
        assert_eq!(json["product_id"], 5);
        assert_eq!(json["configuration"]["total_quantity"], 3);
        assert_eq!(json["configuration"]["lines"]["11"]["product_id"], 11);
    }
}
