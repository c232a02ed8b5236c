// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Pure order and rewards transitions.
//!
//! Every function here takes the current values by reference and returns
//! the new values. Nothing in this crate performs I/O.

mod config;
mod error;
mod lifecycle;
mod placement;
mod rewards;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use config::{PricingConfig, RewardsConfig};
pub use error::CoreError;
pub use lifecycle::{
    advance_order, advancement_location, award_delivery, cancel_order, delivery_bonus,
};
pub use placement::{
    OrderQuote, Placement, authorize_redemption, delivery_fee, quote_order, redeem_for_order,
};
pub use rewards::{
    bill_points, daily_login, daily_login_eligible, prepare_bill, redeem_reward, reset_standing,
    verify_bill,
};
pub use state::{AdvanceResult, BillVerification, PointsTransition};
