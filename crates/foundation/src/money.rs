use serde::{Deserialize, Serialize};

/// Non-negative amount in minor units (1/100 of the currency).
///
/// Prices arrive as JSON decimals; storing minor units keeps cart totals exact
/// so `sum(price * qty)` never drifts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor(minor: u64) -> Self {
        Money(minor)
    }

    /// Converts a decimal amount, rounding to the nearest minor unit.
    ///
    /// Returns `None` for negative, NaN or infinite input.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        let minor = (amount * 100.0).round();
        if minor > u64::MAX as f64 {
            return None;
        }
        Some(Money(minor as u64))
    }

    pub fn minor(self) -> u64 {
        self.0
    }

    pub fn times(self, qty: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(qty)))
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// `"{symbol}{units}.{cents:02}"`, e.g. `₹149.50`.
    pub fn format_with(self, symbol: &str) -> String {
        format!("{symbol}{self}")
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}
