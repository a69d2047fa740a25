//! Exact proportional allocation.
//!
//! Splits an amount into parts proportional to a set of weights such that
//! the parts always add up to the original amount.

pub mod engine;
pub mod error;
pub mod money;
pub mod types;

#[cfg(test)]
mod props;

pub use engine::{Allocator, allocate};
pub use error::{AllocationError, AllocationResult};
pub use money::{allocate_money, split_money};
pub use types::WeightSpec;
