// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monetary amounts.
//!
//! Amounts are held as integer paise so that point formulas floor exactly.
//! On the wire an amount is a JSON number of rupees (e.g. `499.5`).

use crate::error::DomainError;
use num_traits::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const PAISE_PER_RUPEE: u64 = 100;

/// A non-negative amount of Indian rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    paise: u64,
}

impl Money {
    /// Zero rupees.
    pub const ZERO: Self = Self { paise: 0 };

    /// Creates an amount from integer paise.
    #[must_use]
    pub const fn from_paise(paise: u64) -> Self {
        Self { paise }
    }

    /// Creates an amount from whole rupees.
    #[must_use]
    pub const fn from_rupees(rupees: u64) -> Self {
        Self {
            paise: rupees.saturating_mul(PAISE_PER_RUPEE),
        }
    }

    /// Parses a rupee value as it appears on the wire.
    ///
    /// The value is rounded to the nearest paisa.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if the value is negative, not finite,
    /// or not representable.
    pub fn from_rupees_f64(rupees: f64) -> Result<Self, DomainError> {
        if !rupees.is_finite() || rupees < 0.0 {
            return Err(DomainError::InvalidAmount {
                value: rupees.to_string(),
            });
        }
        let paise: u64 = (rupees * 100.0)
            .round()
            .to_u64()
            .ok_or_else(|| DomainError::InvalidAmount {
                value: rupees.to_string(),
            })?;
        Ok(Self { paise })
    }

    /// Returns the amount in paise.
    #[must_use]
    pub const fn paise(&self) -> u64 {
        self.paise
    }

    /// Returns the amount in rupees as a float, for serialization and display.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_rupees_f64(&self) -> f64 {
        self.paise as f64 / 100.0
    }

    /// Multiplies by a quantity, saturating on overflow.
    #[must_use]
    pub const fn times(&self, quantity: u32) -> Self {
        Self {
            paise: self.paise.saturating_mul(quantity as u64),
        }
    }

    /// Adds two amounts, saturating on overflow.
    #[must_use]
    pub const fn saturating_add(&self, other: Self) -> Self {
        Self {
            paise: self.paise.saturating_add(other.paise),
        }
    }

    /// Subtracts, flooring at zero.
    #[must_use]
    pub const fn saturating_sub(&self, other: Self) -> Self {
        Self {
            paise: self.paise.saturating_sub(other.paise),
        }
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc.saturating_add(m))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "₹{}.{:02}",
            self.paise / PAISE_PER_RUPEE,
            self.paise % PAISE_PER_RUPEE
        )
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_rupees_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rupees: f64 = f64::deserialize(deserializer)?;
        Self::from_rupees_f64(rupees).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees_f64_rounds_to_paise() {
        let money: Money = Money::from_rupees_f64(99.999).unwrap();
        assert_eq!(money.paise(), 10_000);

        let money: Money = Money::from_rupees_f64(12.34).unwrap();
        assert_eq!(money.paise(), 1_234);
    }

    #[test]
    fn test_from_rupees_f64_rejects_negative_and_nan() {
        assert!(Money::from_rupees_f64(-1.0).is_err());
        assert!(Money::from_rupees_f64(f64::NAN).is_err());
        assert!(Money::from_rupees_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let small: Money = Money::from_rupees(10);
        let large: Money = Money::from_rupees(50);
        assert_eq!(small.saturating_sub(large), Money::ZERO);
    }

    #[test]
    fn test_serializes_as_rupee_number() {
        let json: String = serde_json::to_string(&Money::from_paise(45_050)).unwrap();
        assert_eq!(json, "450.5");

        let parsed: Money = serde_json::from_str("450.5").unwrap();
        assert_eq!(parsed, Money::from_paise(45_050));
    }

    #[test]
    fn test_display_formats_rupees_and_paise() {
        assert_eq!(Money::from_paise(49_005).to_string(), "₹490.05");
    }
}
