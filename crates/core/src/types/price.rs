//! Type-safe price representation in integer minor currency units.
//!
//! All money in Ovenline is whole cents. Totals are always recomputed as a
//! fold over line items, so the arithmetic here is deliberately small:
//! multiply a unit price by a quantity, and sum line amounts.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A price in cents (minor currency units).
///
/// Stored as `i64` to match the database column type; the domain never
/// produces negative prices.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type), sqlx(transparent))]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// A price of zero cents.
    pub const ZERO: Self = Self(0);

    /// Create a price from a cent amount.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the amount in cents.
    #[must_use]
    pub const fn as_cents(&self) -> i64 {
        self.0
    }

    /// Multiply a unit price by a quantity, saturating at `i64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    /// Format for display (e.g., "$8.99").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", cents / 100, cents % 100)
    }
}
