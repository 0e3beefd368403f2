//! The triggering request, as an explicit input struct.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mixmatch_core::ProductId;

/// Correlation id minted per handled request (UUIDv7, time-ordered).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A user-initiated "pick for me" signal.
///
/// `raw_product_id` arrives unparsed, exactly as the outer web layer read it
/// off the request; a missing or non-numeric value makes the whole request a
/// no-op. `quantity` is the OUTER quantity (how many configured bundles to
/// add), not anything about the child items; absent or zero means 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomPickRequest {
    pub raw_product_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<u64>,
    pub requested_at: DateTime<Utc>,
}

impl RandomPickRequest {
    pub fn new(raw_product_id: impl Into<String>) -> Self {
        Self {
            raw_product_id: Some(raw_product_id.into()),
            quantity: None,
            requested_at: Utc::now(),
        }
    }

    /// A request carrying no product id at all.
    pub fn empty() -> Self {
        Self {
            raw_product_id: None,
            quantity: None,
            requested_at: Utc::now(),
        }
    }

    pub fn with_quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// The product id, if the raw value is present and numeric.
    pub fn product_id(&self) -> Option<ProductId> {
        let raw = self.raw_product_id.as_deref()?;
        ProductId::from_str(raw).ok()
    }

    /// Outer quantity with the default-to-1 rule applied.
    pub fn outer_quantity(&self) -> u64 {
        match self.quantity {
            None | Some(0) => 1,
            Some(q) => q,
        }
    }
}
