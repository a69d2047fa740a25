//! Allocation input types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{AllocationError, AllocationResult};

/// How an amount is shared between parties.
///
/// Deserializes from either a bare count (`3`) or a list of weights
/// (`[1, 1, 2]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightSpec {
    /// Split evenly among this many parties.
    Count(usize),
    /// One relative weight per party, in output order.
    Weights(Vec<Decimal>),
}

impl WeightSpec {
    /// Number of parties the amount is split between.
    #[must_use]
    pub fn party_count(&self) -> usize {
        match self {
            Self::Count(n) => *n,
            Self::Weights(weights) => weights.len(),
        }
    }

    /// Resolves into one weight per party.
    ///
    /// A bare count and an all-zero list both become equal weights of 1.
    ///
    /// # Errors
    ///
    /// - `InvalidParties` when there are no parties
    /// - `InvalidWeight` for the first negative weight
    pub fn normalize(self) -> AllocationResult<Vec<Decimal>> {
        if self.party_count() == 0 {
            return Err(AllocationError::InvalidParties);
        }

        match self {
            Self::Count(n) => Ok(vec![Decimal::ONE; n]),
            Self::Weights(weights) => {
                if let Some((index, weight)) = weights
                    .iter()
                    .enumerate()
                    .find(|(_, w)| w.is_sign_negative() && !w.is_zero())
                {
                    return Err(AllocationError::InvalidWeight {
                        index,
                        weight: *weight,
                    });
                }

                if weights.iter().all(Decimal::is_zero) {
                    Ok(vec![Decimal::ONE; weights.len()])
                } else {
                    Ok(weights)
                }
            }
        }
    }
}

impl From<usize> for WeightSpec {
    fn from(parties: usize) -> Self {
        Self::Count(parties)
    }
}

impl From<Vec<Decimal>> for WeightSpec {
    fn from(weights: Vec<Decimal>) -> Self {
        Self::Weights(weights)
    }
}

impl From<&[Decimal]> for WeightSpec {
    fn from(weights: &[Decimal]) -> Self {
        Self::Weights(weights.to_vec())
    }
}

impl From<Vec<u64>> for WeightSpec {
    fn from(weights: Vec<u64>) -> Self {
        Self::from(weights.as_slice())
    }
}

impl From<&[u64]> for WeightSpec {
    fn from(weights: &[u64]) -> Self {
        Self::Weights(weights.iter().copied().map(Decimal::from).collect())
    }
}

impl<const N: usize> From<[u64; N]> for WeightSpec {
    fn from(weights: [u64; N]) -> Self {
        Self::from(weights.as_slice())
    }
}
