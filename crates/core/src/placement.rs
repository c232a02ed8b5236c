// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checkout: totals, delivery fee, and points earned at placement.

use crate::config::PricingConfig;
use crate::error::CoreError;
use crate::state::PointsTransition;
use swadesi_domain::{Address, Cart, DomainError, Money, Multiplier, NewOrder, Order, User};
use swadesi_ledger::{ActivitySource, LedgerEntry, short_order_ref};
use time::{Duration, OffsetDateTime};

/// The figures computed for a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderQuote {
    pub subtotal: Money,
    pub made_in_india_total: Money,
    pub delivery_fee: Money,
    pub points_used: u64,
    /// Charged amount: subtotal plus fee minus redeemed points, floored at zero.
    pub final_total: Money,
    pub base_points: u64,
    pub bonus_points: u64,
    pub points_earned: u64,
    pub estimated_delivery: OffsetDateTime,
}

/// A quote together with the order it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub quote: OrderQuote,
    pub order: Order,
}

/// Floors `amount * per_mille / 1000` and converts paise to whole rupees.
pub(crate) fn rupee_share(amount: Money, per_mille: u32) -> u64 {
    let scaled: u128 = u128::from(amount.paise()) * u128::from(per_mille) / 100_000;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Rejects a redemption larger than the user's balance.
///
/// # Errors
///
/// Returns `DomainError::InsufficientPoints` if `points` exceeds the balance.
pub const fn authorize_redemption(user: &User, points: u64) -> Result<(), CoreError> {
    if user.can_afford(points) {
        Ok(())
    } else {
        Err(CoreError::DomainViolation(DomainError::InsufficientPoints {
            requested: points,
            available: user.points(),
        }))
    }
}

/// The delivery fee for a cart total.
///
/// An address always supplies its own fee. Without one, carts above the
/// free-delivery threshold ship free.
#[must_use]
pub fn delivery_fee(subtotal: Money, address: Option<&Address>, config: &PricingConfig) -> Money {
    match address {
        Some(address) => address.delivery_fee,
        None if subtotal > config.free_delivery_threshold => Money::ZERO,
        None => config.default_delivery_fee,
    }
}

/// Computes the checkout figures and builds the order to persist.
///
/// The redemption is not re-validated here; see [`authorize_redemption`].
///
/// # Arguments
///
/// * `cart` - The cart being checked out
/// * `user` - The signed-in user, if any
/// * `points_used` - Points redeemed against this order
/// * `address` - The selected delivery address, if any
/// * `now` - Placement time
/// * `config` - Pricing rates
///
/// # Errors
///
/// Returns `CoreError::EmptyCart` or `CoreError::NoActiveUser`.
pub fn quote_order(
    cart: &Cart,
    user: Option<&User>,
    points_used: u64,
    address: Option<&Address>,
    now: OffsetDateTime,
    config: &PricingConfig,
) -> Result<Placement, CoreError> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    let user: &User = user.ok_or(CoreError::NoActiveUser)?;

    let subtotal: Money = cart.total();
    let fee: Money = delivery_fee(subtotal, address, config);
    let redeemed: Money = Money::from_rupees(points_used);
    let final_total: Money = subtotal.saturating_add(fee).saturating_sub(redeemed);
    let made_in_india_total: Money = cart.made_in_india_total();

    let multiplier: Multiplier = user.points_tier().multiplier();
    let base_points: u64 = rupee_share(final_total, config.base_points_per_mille);
    let bonus_points: u64 = rupee_share(made_in_india_total, config.made_in_india_bonus_per_mille);
    let points_earned: u64 = multiplier.apply(base_points.saturating_add(bonus_points));

    let eta_minutes: u32 = address
        .and_then(|a| a.estimated_delivery_time)
        .unwrap_or(config.default_eta_minutes);
    let estimated_delivery: OffsetDateTime = now + Duration::minutes(i64::from(eta_minutes));

    let placed_location: String = address.map_or_else(
        || config.default_placed_location.clone(),
        |a| a.delivery_area.clone(),
    );

    let quote: OrderQuote = OrderQuote {
        subtotal,
        made_in_india_total,
        delivery_fee: fee,
        points_used,
        final_total,
        base_points,
        bonus_points,
        points_earned,
        estimated_delivery,
    };

    let order: Order = Order::from_new(NewOrder {
        items: cart.items().to_vec(),
        total: final_total,
        points_earned,
        points_used,
        placed_at: now,
        estimated_delivery,
        delivery_address: address.cloned(),
        placed_location,
    });

    Ok(Placement { quote, order })
}

/// Debits the points redeemed on a persisted order.
///
/// Returns the user unchanged and no entry when nothing was redeemed.
///
/// # Errors
///
/// Returns `DomainError::OrderNotPersisted` if the order has no id, or
/// `DomainError::InsufficientPoints` if the balance no longer covers it.
pub fn redeem_for_order(user: &User, order: &Order) -> Result<PointsTransition, CoreError> {
    if order.points_used() == 0 {
        return Ok(PointsTransition::unchanged(user));
    }
    if !order.is_persisted() {
        return Err(CoreError::DomainViolation(DomainError::OrderNotPersisted));
    }

    let mut new_user: User = user.clone();
    new_user.debit(order.points_used())?;

    let entry: LedgerEntry = LedgerEntry::redeemed(
        order.points_used(),
        ActivitySource::Order,
        format!("Points used for order {}", short_order_ref(order.id())),
    )?
    .with_order(order.id());

    Ok(PointsTransition {
        user: new_user,
        points: order.points_used(),
        entry: Some(entry),
    })
}
