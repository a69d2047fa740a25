//! Core allocation logic for Apportion.
//!
//! This crate contains the pure allocation algorithm with ZERO I/O
//! dependencies.
//!
//! # Modules
//!
//! - `allocation` - Exact proportional splitting of amounts and money values

pub mod allocation;

pub use allocation::{AllocationError, AllocationResult, Allocator, WeightSpec, allocate};
