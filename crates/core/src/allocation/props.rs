//! Property-based tests for allocation.
//!
//! - Conservation: parts always sum to the amount
//! - Cardinality: one part per party
//! - Normalization: counts, unit weights and all-zero weights agree
//! - Range: large weights and amounts never overflow

use proptest::prelude::*;
use rust_decimal::Decimal;

use apportion_shared::types::{Currency, Money};

use super::{Allocator, allocate, allocate_money};

/// Strategy to generate amounts in minor units, signed.
fn amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(Decimal::from)
}

/// Strategy to generate amounts with up to 4 decimal places, signed.
fn fractional_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate party counts (1 to 50).
fn party_count() -> impl Strategy<Value = usize> {
    1usize..50
}

/// Strategy to generate weight lists near the top of the `u64` range.
fn large_weights() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(u64::MAX / 2..=u64::MAX, 1..8)
}

/// Strategy to generate weight lists, zeros included.
fn weights() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..1_000, 1..20)
}

fn sum(parts: &[Decimal]) -> Decimal {
    parts.iter().copied().sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Parts always sum to the original amount.
    #[test]
    fn prop_conservation(amount in amount(), weights in weights()) {
        let parts = allocate(amount, weights, true).unwrap();
        prop_assert_eq!(sum(&parts), amount);
    }

    /// Conservation also holds for non-integral amounts and fractional mode.
    #[test]
    fn prop_conservation_fractional(
        amount in fractional_amount(),
        weights in weights(),
        whole_units in any::<bool>(),
    ) {
        let parts = allocate(amount, weights, whole_units).unwrap();
        prop_assert_eq!(sum(&parts), amount);
    }

    /// Huge weights never overflow and still conserve the amount.
    #[test]
    fn prop_large_weights_conserve(amount in amount(), weights in large_weights()) {
        let parts = allocate(amount, weights, true).unwrap();
        prop_assert_eq!(sum(&parts), amount);
    }

    /// Exactly one part per party.
    #[test]
    fn prop_cardinality(amount in amount(), weights in weights()) {
        let count = weights.len();
        let parts = allocate(amount, weights, true).unwrap();
        prop_assert_eq!(parts.len(), count);
    }

    /// Whole-unit splits of integral amounts are integral.
    #[test]
    fn prop_whole_units_are_integral(amount in amount(), weights in weights()) {
        let parts = allocate(amount, weights, true).unwrap();
        prop_assert!(parts.iter().all(|p| p.fract().is_zero()));
    }

    /// A bare count behaves like a list of unit weights.
    #[test]
    fn prop_count_matches_unit_weights(amount in amount(), parties in party_count()) {
        let by_count = allocate(amount, parties, true).unwrap();
        let by_weights = allocate(amount, vec![1u64; parties], true).unwrap();
        prop_assert_eq!(by_count, by_weights);
    }

    /// All-zero weights behave like an even split.
    #[test]
    fn prop_all_zero_weights_match_count(amount in amount(), parties in party_count()) {
        let zeros = allocate(amount, vec![0u64; parties], true).unwrap();
        let by_count = allocate(amount, parties, true).unwrap();
        prop_assert_eq!(zeros, by_count);
    }

    /// Even splits differ by at most one unit and never flip sign.
    #[test]
    fn prop_even_split_is_balanced(amount in amount(), parties in party_count()) {
        let parts = Allocator::new().split(amount, parties).unwrap();
        let max = parts.iter().copied().max().unwrap_or_default();
        let min = parts.iter().copied().min().unwrap_or_default();
        prop_assert!(max - min <= Decimal::ONE);
        if amount.is_sign_positive() {
            prop_assert!(parts.iter().all(|p| !p.is_sign_negative()));
        } else {
            prop_assert!(parts.iter().all(|p| p.is_zero() || p.is_sign_negative()));
        }
    }

    /// A single party receives the whole amount.
    #[test]
    fn prop_single_party(amount in fractional_amount()) {
        prop_assert_eq!(allocate(amount, 1, true).unwrap(), vec![amount]);
    }

    /// Money parts keep the currency and sum to the original value.
    #[test]
    fn prop_money_conservation(cents in -100_000_000i64..100_000_000i64, weights in weights()) {
        let money = Money::new(Decimal::new(cents, 2), Currency::Usd);
        let parts = allocate_money(&money, weights).unwrap();
        prop_assert!(parts.iter().all(|m| m.currency == Currency::Usd));
        let total: Decimal = parts.iter().map(|m| m.amount).sum();
        prop_assert_eq!(total, money.amount);
    }
}
