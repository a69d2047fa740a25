//! Allocation error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using `AllocationError`.
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Allocation-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// The weights resolve to zero parties.
    #[error("Need at least one party to allocate to")]
    InvalidParties,

    /// A weight is negative.
    #[error("Invalid weight at index {index}: {weight} is negative")]
    InvalidWeight {
        /// Position of the offending weight.
        index: usize,
        /// The rejected weight.
        weight: Decimal,
    },

    /// An intermediate value left the decimal range.
    #[error("Allocation of {amount} overflowed the decimal range")]
    Overflow {
        /// The amount being allocated.
        amount: Decimal,
    },

    /// A money value could not be converted to or from minor units.
    #[error(transparent)]
    Money(#[from] apportion_shared::types::MoneyError),
}
