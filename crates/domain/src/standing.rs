// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reward tiers, levels, and multipliers.
//!
//! Standing is a pure function of lifetime points. Nothing in here
//! touches the network or storage.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifetime points needed to gain one level.
pub const POINTS_PER_LEVEL: u64 = 500;

/// Reward tiers, lowest first.
///
/// The derived ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Emerald,
    Ruby,
    Cosmic,
    Infinite,
}

impl Tier {
    /// All tiers in ascending order.
    pub const ALL: [Self; 9] = [
        Self::Bronze,
        Self::Silver,
        Self::Gold,
        Self::Platinum,
        Self::Diamond,
        Self::Emerald,
        Self::Ruby,
        Self::Cosmic,
        Self::Infinite,
    ];

    /// Returns the string representation of the tier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
            Self::Diamond => "diamond",
            Self::Emerald => "emerald",
            Self::Ruby => "ruby",
            Self::Cosmic => "cosmic",
            Self::Infinite => "infinite",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .iter()
            .copied()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| DomainError::InvalidTier {
                tier: s.to_string(),
            })
    }

    /// Lifetime points at which this tier begins.
    #[must_use]
    pub const fn threshold(&self) -> u64 {
        match self {
            Self::Bronze => 0,
            Self::Silver => 1_000,
            Self::Gold => 2_500,
            Self::Platinum => 5_000,
            Self::Diamond => 10_000,
            Self::Emerald => 20_000,
            Self::Ruby => 35_000,
            Self::Cosmic => 50_000,
            Self::Infinite => 100_000,
        }
    }

    /// Returns the earning multiplier for this tier.
    #[must_use]
    pub const fn multiplier(&self) -> Multiplier {
        let per_mille: u32 = match self {
            Self::Bronze => 1_000,
            Self::Silver => 1_100,
            Self::Gold => 1_250,
            Self::Platinum => 1_500,
            Self::Diamond => 1_750,
            Self::Emerald => 2_000,
            Self::Ruby => 2_250,
            Self::Cosmic => 2_500,
            Self::Infinite => 3_000,
        };
        Multiplier::from_per_mille(per_mille)
    }

    /// Returns the highest tier whose threshold is at or below `lifetime_points`.
    #[must_use]
    pub fn for_lifetime_points(lifetime_points: u64) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|tier| lifetime_points >= tier.threshold())
            .unwrap_or(Self::Bronze)
    }
}

impl FromStr for Tier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A positive earning multiplier, in thousandths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Multiplier {
    per_mille: u32,
}

impl Multiplier {
    /// The identity multiplier (1.0).
    pub const ONE: Self = Self { per_mille: 1_000 };

    /// Creates a multiplier from thousandths. Zero is clamped to one thousandth.
    #[must_use]
    pub const fn from_per_mille(per_mille: u32) -> Self {
        Self {
            per_mille: if per_mille == 0 { 1 } else { per_mille },
        }
    }

    /// Returns the multiplier in thousandths.
    #[must_use]
    pub const fn per_mille(&self) -> u32 {
        self.per_mille
    }

    /// Applies the multiplier to a points amount, flooring the result.
    #[must_use]
    pub fn apply(&self, points: u64) -> u64 {
        let scaled: u128 = u128::from(points) * u128::from(self.per_mille) / 1_000;
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

impl std::fmt::Display for Multiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:03}x", self.per_mille / 1_000, self.per_mille % 1_000)
    }
}

/// A user's level and tier, derived together from lifetime points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub level: u32,
    pub tier: Tier,
}

/// Computes `(level, tier)` for a lifetime points total.
///
/// Total over all inputs: zero lifetime points is level 1, bronze.
#[must_use]
pub fn compute_standing(lifetime_points: u64) -> Standing {
    let level: u32 = u32::try_from(lifetime_points / POINTS_PER_LEVEL)
        .unwrap_or(u32::MAX)
        .saturating_add(1);
    Standing {
        level,
        tier: Tier::for_lifetime_points(lifetime_points),
    }
}

/// Returns the earning multiplier for `tier`.
#[must_use]
pub const fn tier_multiplier(tier: Tier) -> Multiplier {
    tier.multiplier()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_points_is_level_one_bronze() {
        let standing: Standing = compute_standing(0);
        assert_eq!(standing.level, 1);
        assert_eq!(standing.tier, Tier::Bronze);
    }

    #[test]
    fn test_tier_is_monotonic_in_lifetime_points() {
        let mut previous: Tier = Tier::Bronze;
        let mut previous_level: u32 = 1;
        for points in (0..120_000_u64).step_by(250) {
            let standing: Standing = compute_standing(points);
            assert!(standing.tier >= previous, "tier dropped at {points}");
            assert!(standing.level >= previous_level, "level dropped at {points}");
            previous = standing.tier;
            previous_level = standing.level;
        }
        assert_eq!(previous, Tier::Infinite);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(Tier::for_lifetime_points(999), Tier::Bronze);
        assert_eq!(Tier::for_lifetime_points(1_000), Tier::Silver);
        assert_eq!(Tier::for_lifetime_points(2_499), Tier::Silver);
        assert_eq!(Tier::for_lifetime_points(2_500), Tier::Gold);
        assert_eq!(Tier::for_lifetime_points(u64::MAX), Tier::Infinite);
    }

    #[test]
    fn test_level_saturates_for_huge_totals() {
        assert_eq!(compute_standing(u64::MAX).level, u32::MAX);
    }

    #[test]
    fn test_multipliers_are_non_decreasing() {
        for pair in Tier::ALL.windows(2) {
            assert!(tier_multiplier(pair[0]) <= tier_multiplier(pair[1]));
        }
        assert_eq!(tier_multiplier(Tier::Bronze), Multiplier::ONE);
    }

    #[test]
    fn test_multiplier_apply_floors() {
        let silver: Multiplier = Tier::Silver.multiplier();
        assert_eq!(silver.apply(15), 16);
        assert_eq!(Multiplier::ONE.apply(150), 150);
        assert_eq!(Multiplier::from_per_mille(3_000).apply(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_tier_string_parsing() {
        for tier in Tier::ALL {
            assert_eq!(tier.as_str().parse::<Tier>().unwrap(), tier);
        }
        assert!("mithril".parse::<Tier>().is_err());
    }

    #[test]
    fn test_tier_serializes_snake_case() {
        let json: String = serde_json::to_string(&Tier::Platinum).unwrap();
        assert_eq!(json, "\"platinum\"");
    }
}
