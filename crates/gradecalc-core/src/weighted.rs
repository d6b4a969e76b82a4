//! Coefficient-weighted mean shared by every calculator.

use serde::{Deserialize, Serialize};

/// A score paired with its coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub value: f64,
    pub coefficient: f64,
}

impl WeightedTerm {
    pub fn new(value: f64, coefficient: f64) -> Self {
        Self { value, coefficient }
    }
}

/// Compute `sum(value * coefficient) / sum(coefficient)`.
///
/// Returns `None` for an empty collection, a non-positive total coefficient,
/// or a sum that overflows, so `inf` and `NaN` never leak out. No rounding is
/// applied.
pub fn weighted_average<I>(terms: I) -> Option<f64>
where
    I: IntoIterator<Item = WeightedTerm>,
{
    let (sum, total) = terms.into_iter().fold((0.0f64, 0.0f64), |(sum, total), t| {
        (sum + t.value * t.coefficient, total + t.coefficient)
    });

    if total <= 0.0 {
        return None;
    }
    let avg = sum / total;
    avg.is_finite().then_some(avg)
}
