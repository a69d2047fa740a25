//! Allocation of money values in their currency's minor units.

use apportion_shared::types::Money;

use super::engine::Allocator;
use super::error::{AllocationError, AllocationResult};
use super::types::WeightSpec;

/// Allocate a money value across parties without losing a minor unit.
///
/// The amount is converted to minor units (cents for USD, yen for JPY) and
/// split in whole-units mode, so every part is a whole number of minor units
/// unless the input already carried sub-minor precision.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use apportion_core::allocation::allocate_money;
/// use apportion_shared::{Currency, Money};
///
/// let bill = Money::new(dec!(100), Currency::Usd);
/// let parts = allocate_money(&bill, [1, 1, 1]).unwrap();
/// assert_eq!(parts[0].amount, dec!(33.34));
/// assert_eq!(parts[1].amount, dec!(33.33));
/// ```
pub fn allocate_money(
    money: &Money,
    weights: impl Into<WeightSpec>,
) -> AllocationResult<Vec<Money>> {
    let weights = weights.into();
    if money.is_zero() {
        let parties = weights.normalize()?.len();
        return Ok(vec![Money::zero(money.currency); parties]);
    }

    let units = money.to_minor_units()?;

    Allocator::new()
        .allocate(units, weights)?
        .into_iter()
        .map(|part| {
            Money::from_minor_units(part, money.currency).map_err(AllocationError::from)
        })
        .collect()
}

/// Split a money value evenly among `parties`.
pub fn split_money(money: &Money, parties: usize) -> AllocationResult<Vec<Money>> {
    allocate_money(money, WeightSpec::Count(parties))
}
