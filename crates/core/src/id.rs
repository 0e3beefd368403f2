//! Strongly-typed identifiers used across the domain.
//!
//! Product and variation identifiers are numeric (the upstream catalog
//! addresses everything through one numeric id space), wrapped in newtypes so
//! they cannot be mixed up at call sites.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a catalog product (bundle parent or child product).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

/// Identifier of a product variation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationId(u64);

/// Identity of a child item inside a bundle.
///
/// The variation id is the identity when the item points at a variation;
/// otherwise the product id is. Both live in the same numeric id space, so the
/// key is a single number (see [`ChildItemKey::resolve`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildItemKey(u64);

macro_rules! impl_numeric_id {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id = u64::from_str(s.trim())
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(id))
            }
        }
    };
}

impl_numeric_id!(ProductId, "ProductId");
impl_numeric_id!(VariationId, "VariationId");
impl_numeric_id!(ChildItemKey, "ChildItemKey");

impl ChildItemKey {
    /// Resolve the identity of a child item: variation id when present,
    /// product id otherwise.
    pub fn resolve(product_id: ProductId, variation_id: Option<VariationId>) -> Self {
        match variation_id {
            Some(v) => Self(v.as_u64()),
            None => Self(product_id.as_u64()),
        }
    }
}
