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

mod error;
mod money;
mod order;
mod standing;
mod types;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use money::Money;
pub use order::{NewOrder, Order, OrderStatus, TrackingStep};
pub use standing::{
    Multiplier, POINTS_PER_LEVEL, Standing, Tier, compute_standing, tier_multiplier,
};

// Re-export public types
pub use types::{Address, BillRecord, Cart, CartItem, DeliveryPerson, Product, User};
