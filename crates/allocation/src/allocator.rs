//! Two-pass random quantity allocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mixmatch_catalog::Bundle;
use mixmatch_core::{ChildItemKey, ProductId, VariationId};

use crate::rng::QuantityRng;

/// One allocated child item: what to add, and how much of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedLine {
    pub product_id: ProductId,
    pub variation_id: Option<VariationId>,
    pub quantity: u64,
}

/// A complete configuration: child-item identity mapped to its allocated
/// line, plus the grand total. Serializes as the cart item metadata attached
/// to the parent bundle product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllocationResult {
    lines: BTreeMap<ChildItemKey, AllocatedLine>,
    total_quantity: u64,
}

impl AllocationResult {
    pub fn lines(&self) -> &BTreeMap<ChildItemKey, AllocatedLine> {
        &self.lines
    }

    pub fn get(&self, key: ChildItemKey) -> Option<&AllocatedLine> {
        self.lines.get(&key)
    }

    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Randomly distributes a target total quantity across a bundle's child
/// items, respecting each item's min/max/step rule and the bundle's
/// container-size bounds.
///
/// The target is the midpoint of the container bounds (just the minimum when
/// no maximum is set). Allocation runs in two passes over the items in
/// catalog order:
///
/// 1. Each in-stock item draws a random step count between its effective
///    minimum and its effective maximum (capped at the per-item fair share
///    and at what is still missing from the target). The pass exits early
///    once the target is reached.
/// 2. If the total fell short, the shortfall is rounded down to each item's
///    step and handed to already-allocated items until the gap closes.
///
/// Known limitation, kept on purpose: the top-up pass never introduces an
/// item that pass 1 left out, so a large step-aligned gap can go unfilled.
/// Callers must treat the result as best-effort; the total may land under
/// the target.
///
/// When an item's effective minimum exceeds its effective maximum (an
/// inverted step range), the item is allocated zero for the first pass but
/// still recorded, which keeps it eligible for top-up. This never produces
/// negative or fractional quantities.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAllocator;

impl RandomAllocator {
    pub fn new() -> Self {
        Self
    }

    pub fn allocate<R: QuantityRng + ?Sized>(
        &self,
        bundle: &Bundle,
        rng: &mut R,
    ) -> AllocationResult {
        // Midpoint heuristic; real-valued on purpose (an odd min+max sum
        // yields a .5 target the integer passes approach from below).
        let target = match bundle.max_container_size {
            Some(max) => (bundle.min_container_size + max) as f64 / 2.0,
            None => bundle.min_container_size as f64,
        };

        let items = bundle.child_items();

        // Fair-share baseline, counted over ALL items (out-of-stock included).
        let n = items.len() as u64;
        let per_item_target = if target > 0.0 && n as f64 >= target {
            (n as f64 / target).floor() as u64
        } else {
            1
        };

        let mut lines: BTreeMap<ChildItemKey, AllocatedLine> = BTreeMap::new();
        let mut total: u64 = 0;

        // First pass: random draw per in-stock item, early exit on target.
        for item in items {
            if !item.in_stock {
                continue;
            }

            let key = item.key();
            let step = item.rule.effective_step();

            // No explicit minimum means the item's floor defaults UP to the
            // fair share, not down to zero.
            let item_min = if item.rule.min > 0 {
                item.rule.min
            } else {
                per_item_target
            };
            let item_max = match item.rule.max {
                Some(max) if max <= per_item_target => max,
                _ => per_item_target,
            };

            let min_steps = item_min.div_ceil(step);
            let mut max_steps = item_max / step;

            // Never draw past what is still missing from the target.
            let remaining = target - total as f64;
            let remaining_steps = if remaining > 0.0 {
                (remaining / step as f64).floor() as u64
            } else {
                0
            };
            max_steps = max_steps.min(remaining_steps);

            // Inverted step range: nothing this item can legally contribute
            // here. Record a zero line so the top-up pass may still raise it.
            let qty = if min_steps <= max_steps {
                rng.pick_in_range(min_steps, max_steps) * step
            } else {
                0
            };

            total += qty;
            lines.insert(
                key,
                AllocatedLine {
                    product_id: item.product_id,
                    variation_id: item.variation_id,
                    quantity: qty,
                },
            );

            if total as f64 >= target {
                break;
            }
        }

        // Second pass: distribute any shortfall, step-aligned, to items that
        // already hold a line.
        if (total as f64) < target {
            for item in items {
                let key = item.key();

                let gap = target - total as f64;
                let additional = if gap > 0.0 {
                    item.rule.align_down(gap.floor() as u64)
                } else {
                    0
                };

                if additional > 0 {
                    if let Some(line) = lines.get_mut(&key) {
                        line.quantity += additional;
                        total += additional;
                    }
                }

                if total as f64 >= target {
                    break;
                }
            }
        }

        AllocationResult {
            lines,
            total_quantity: total,
        }
    }
}
