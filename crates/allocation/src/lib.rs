//! Random allocation of quantities across bundle child items.
//!
//! The one nontrivial piece of this workspace: given a bundle's container-size
//! bounds and its child items (each with min/max/step quantity rules), pick a
//! random configuration whose total lands at, or as close as possible under,
//! a derived target. Deterministic domain logic over an injected random
//! source (no IO, no HTTP, no storage).

pub mod allocator;
pub mod rng;

pub use allocator::{AllocatedLine, AllocationResult, RandomAllocator};
pub use rng::{QuantityRng, ScriptedRng, SeededRng, ThreadRngSource};
