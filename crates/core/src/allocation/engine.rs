//! Proportional split with leftover redistribution.
//!
//! Parties are processed from last to first. Each party receives
//! `remaining * weight / pending` where `pending` is the sum of the weights
//! not yet assigned, itself included. The first party therefore always
//! absorbs whatever is left, so the parts add up to the original amount.
//!
//! Each share is computed on the exact integer mantissas and truncated
//! toward zero, so neither the product nor the quotient is ever rounded.
//!
//! Without whole units, splits are truncated to a working scale derived from
//! the amount instead, which keeps every subtraction within `Decimal`'s 28
//! significant digits and therefore exact.
//!
//! Truncation in whole-units mode can leave a fractional residual when the
//! amount itself is not integral. That residual is handed out one unit at a
//! time, round-robin from the first party.

use num_bigint::BigInt;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::error::{AllocationError, AllocationResult};
use super::types::WeightSpec;

/// Splits amounts proportionally without losing units.
///
/// The allocator is a plain value: it holds no state besides the rounding
/// mode and can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocator {
    whole_units: bool,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator {
    /// Creates an allocator that truncates every split to whole units.
    #[must_use]
    pub const fn new() -> Self {
        Self { whole_units: true }
    }

    /// Creates an allocator with an explicit rounding mode.
    ///
    /// With `whole_units` off, splits keep up to 27 significant digits.
    #[must_use]
    pub const fn with_whole_units(whole_units: bool) -> Self {
        Self { whole_units }
    }

    /// Whether splits are truncated to whole units.
    #[must_use]
    pub const fn whole_units(&self) -> bool {
        self.whole_units
    }

    /// Allocate `amount` across the parties described by `weights`.
    ///
    /// # Returns
    ///
    /// One part per party, in the order the weights were given. The parts sum
    /// to `amount` exactly.
    ///
    /// # Errors
    ///
    /// - `InvalidParties` if there are no parties
    /// - `InvalidWeight` if any weight is negative
    /// - `Overflow` if the weights sum out of the decimal range
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use apportion_core::allocation::Allocator;
    ///
    /// let parts = Allocator::new().allocate(dec!(100), [1, 1, 2]).unwrap();
    /// assert_eq!(parts, vec![dec!(25), dec!(25), dec!(50)]);
    /// ```
    pub fn allocate(
        &self,
        amount: Decimal,
        weights: impl Into<WeightSpec>,
    ) -> AllocationResult<Vec<Decimal>> {
        let weights = weights.into().normalize()?;
        let overflow = || AllocationError::Overflow { amount };

        let mut pending = weights
            .iter()
            .try_fold(Decimal::ZERO, |acc, w| acc.checked_add(*w))
            .ok_or_else(overflow)?;

        let scale = if self.whole_units { 0 } else { working_scale(amount) };
        let mut parts = vec![Decimal::ZERO; weights.len()];
        let mut remaining = amount;

        for (index, weight) in weights.iter().enumerate().rev() {
            let split = if pending.is_zero() {
                Decimal::ZERO
            } else {
                proportional_share(remaining, *weight, pending, scale).ok_or_else(overflow)?
            };

            parts[index] = split;
            remaining -= split;
            pending -= *weight;
        }

        if !remaining.is_zero() {
            debug!(
                %amount,
                leftover = %remaining,
                parties = parts.len(),
                "Redistributing leftover"
            );
            distribute_leftover(&mut parts, remaining);
        }

        trace!(%amount, parties = parts.len(), whole_units = self.whole_units, "Allocated");
        Ok(parts)
    }

    /// Split `amount` evenly among `parties`.
    ///
    /// Earlier parties receive the larger parts when the amount does not
    /// divide evenly: `split(10, 3)` is `[4, 3, 3]`.
    pub fn split(&self, amount: Decimal, parties: usize) -> AllocationResult<Vec<Decimal>> {
        self.allocate(amount, WeightSpec::Count(parties))
    }
}

/// Allocate `amount` across `weights`, truncating to whole units when
/// `whole_units` is set.
///
/// Shorthand for `Allocator::with_whole_units(whole_units).allocate(..)`.
pub fn allocate(
    amount: Decimal,
    weights: impl Into<WeightSpec>,
    whole_units: bool,
) -> AllocationResult<Vec<Decimal>> {
    Allocator::with_whole_units(whole_units).allocate(amount, weights)
}

/// `remaining * weight / pending` truncated toward zero at `scale` decimal
/// places.
///
/// With `r = mr / 10^sr`, `w = mw / 10^sw` and `p = mp / 10^sp`, the result
/// mantissa is `mr * mw * 10^(sp + scale) / (mp * 10^(sr + sw))`. `pending`
/// must be nonzero.
fn proportional_share(
    remaining: Decimal,
    weight: Decimal,
    pending: Decimal,
    scale: u32,
) -> Option<Decimal> {
    let numerator = BigInt::from(remaining.mantissa())
        * BigInt::from(weight.mantissa())
        * pow10(pending.scale() + scale);
    let denominator =
        BigInt::from(pending.mantissa()) * pow10(remaining.scale() + weight.scale());

    let quotient = i128::try_from(numerator / denominator).ok()?;
    Decimal::try_from_i128_with_scale(quotient, scale).ok()
}

fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u8).pow(exponent)
}

/// Largest scale at which any value no bigger than `amount` fits in 27
/// significant digits, never below the amount's own scale.
fn working_scale(amount: Decimal) -> u32 {
    let integral = amount.abs().trunc().normalize().mantissa();
    let digits = integral.checked_ilog10().map_or(0, |d| d + 1);
    amount.scale().max(27u32.saturating_sub(digits))
}

/// Walk the parts round-robin from index 0, moving at most one unit per step
/// until nothing is left over.
fn distribute_leftover(parts: &mut [Decimal], mut remaining: Decimal) {
    let mut cursor = 0;
    while !remaining.is_zero() {
        let step = remaining.abs().min(Decimal::ONE);
        if remaining.is_sign_positive() {
            parts[cursor] += step;
            remaining -= step;
        } else {
            parts[cursor] -= step;
            remaining += step;
        }
        cursor = (cursor + 1) % parts.len();
    }
}
