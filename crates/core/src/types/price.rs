//! Product price in Vietnamese dong.

use serde::{Deserialize, Serialize};

/// A product price.
///
/// Stored as a plain JSON number. Values read back from disk are taken as-is;
/// the non-negative invariant is enforced where user input is parsed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Create a price, rejecting negative and non-finite amounts.
    #[must_use]
    pub fn new(amount: f64) -> Option<Self> {
        (amount.is_finite() && amount >= 0.0).then_some(Self(amount))
    }

    /// The amount in dong.
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }
}
