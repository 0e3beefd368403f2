//! Per-item quantity rule: allowed range plus step granularity.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

fn default_step() -> u64 {
    1
}

/// Quantity constraint for a single child item.
///
/// `max` of `None` means "unbounded" (the allocator resolves it against the
/// fair-share cap). A `step` of zero is tolerated in snapshot data and treated
/// as 1 everywhere via [`QuantityRule::effective_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityRule {
    #[serde(default)]
    pub min: u64,
    #[serde(default)]
    pub max: Option<u64>,
    #[serde(default = "default_step")]
    pub step: u64,
}

impl QuantityRule {
    /// Build a rule, rejecting an inverted range.
    pub fn new(min: u64, max: Option<u64>, step: u64) -> DomainResult<Self> {
        if let Some(max) = max {
            if min > max {
                return Err(DomainError::validation(format!(
                    "quantity rule min {min} exceeds max {max}"
                )));
            }
        }
        Ok(Self { min, max, step })
    }

    /// A rule with no constraints of its own (min 0, unbounded, step 1).
    pub fn any() -> Self {
        Self {
            min: 0,
            max: None,
            step: 1,
        }
    }

    /// Step granularity with the zero-means-one default applied.
    pub fn effective_step(&self) -> u64 {
        if self.step == 0 { 1 } else { self.step }
    }

    /// Largest multiple of the effective step that does not exceed `qty`.
    pub fn align_down(&self, qty: u64) -> u64 {
        let step = self.effective_step();
        qty - qty % step
    }
}

impl Default for QuantityRule {
    fn default() -> Self {
        Self::any()
    }
}
