// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use swadesi_domain::Money;
use time::UtcOffset;

/// Checkout pricing and order points rates.
///
/// Rates are in thousandths: `100` is 10%.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    /// Carts strictly above this total ship free when no address is given.
    pub free_delivery_threshold: Money,
    pub default_delivery_fee: Money,
    pub default_eta_minutes: u32,
    pub base_points_per_mille: u32,
    pub made_in_india_bonus_per_mille: u32,
    pub bill_points_per_mille: u32,
    /// Location recorded on the first tracking step when no address is given.
    pub default_placed_location: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_delivery_threshold: Money::from_rupees(500),
            default_delivery_fee: Money::from_rupees(40),
            default_eta_minutes: 45,
            base_points_per_mille: 100,
            made_in_india_bonus_per_mille: 50,
            bill_points_per_mille: 50,
            default_placed_location: String::from("Order Placed"),
        }
    }
}

/// Challenge values and reset behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardsConfig {
    pub daily_login_challenge_id: String,
    pub daily_login_points: u64,
    /// Balance and lifetime total after clearing all data.
    pub reset_points: u64,
    /// Lifetime total given to profiles that arrive without one.
    pub default_lifetime_points: u64,
    /// Offset used to decide which calendar day a login falls on.
    pub calendar_offset: UtcOffset,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            daily_login_challenge_id: String::from("daily_login"),
            daily_login_points: 25,
            reset_points: 100,
            default_lifetime_points: 100,
            calendar_offset: UtcOffset::UTC,
        }
    }
}
