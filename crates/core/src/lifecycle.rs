// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::{AdvanceResult, PointsTransition};
use swadesi_domain::{DeliveryPerson, DomainError, Order, OrderStatus, User};
use swadesi_ledger::{ActivitySource, LedgerEntry, short_order_ref};
use time::OffsetDateTime;

const PICKUP_LOCATION: &str = "Restaurant";
const DEFAULT_DROP_LOCATION: &str = "Delivery Address";

/// The tracking location recorded when an order enters `status`.
#[must_use]
pub fn advancement_location(status: OrderStatus, user: Option<&User>) -> Option<String> {
    match status {
        OrderStatus::OutForDelivery => Some(PICKUP_LOCATION.to_string()),
        OrderStatus::Delivered => Some(
            user.and_then(User::address)
                .unwrap_or(DEFAULT_DROP_LOCATION)
                .to_string(),
        ),
        _ => None,
    }
}

/// The delivery bonus for `order` at the user's current tier.
#[must_use]
pub fn delivery_bonus(order: &Order, user: &User) -> u64 {
    user.points_tier().multiplier().apply(order.points_earned())
}

/// Advances an order to `status`.
///
/// When the order is delivered and a user is given, the result carries the
/// delivery award computed at the user's current tier. The inputs are not
/// modified.
///
/// # Arguments
///
/// * `order` - The order to advance
/// * `user` - The signed-in user, used for the drop location and the award
/// * `status` - The target status
/// * `now` - Transition time
/// * `courier` - Assigned when entering `OutForDelivery`
///
/// # Errors
///
/// Returns `DomainError::InvalidStatusTransition` if the move is not allowed.
pub fn advance_order(
    order: &Order,
    user: Option<&User>,
    status: OrderStatus,
    now: OffsetDateTime,
    courier: Option<DeliveryPerson>,
) -> Result<AdvanceResult, CoreError> {
    if status == OrderStatus::Cancelled {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: order.status().as_str().to_string(),
                to: status.as_str().to_string(),
                reason: "cancellation is not an advancement".to_string(),
            },
        ));
    }

    let mut new_order: Order = order.clone();
    new_order.transition(status, now, advancement_location(status, user), courier)?;

    let award: Option<PointsTransition> = match (status, user) {
        (OrderStatus::Delivered, Some(user)) => Some(award_delivery(user, &new_order)?),
        _ => None,
    };

    Ok(AdvanceResult {
        order: new_order,
        award,
    })
}

/// Credits the delivery bonus for a delivered order.
///
/// A zero bonus moves no points and produces no ledger entry.
///
/// # Errors
///
/// Returns an error if the order is not delivered or has no id.
pub fn award_delivery(user: &User, order: &Order) -> Result<PointsTransition, CoreError> {
    if order.status() != OrderStatus::Delivered {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: order.status().as_str().to_string(),
                to: OrderStatus::Delivered.as_str().to_string(),
                reason: "delivery bonus requires a delivered order".to_string(),
            },
        ));
    }
    if !order.is_persisted() {
        return Err(CoreError::DomainViolation(DomainError::OrderNotPersisted));
    }

    let bonus: u64 = delivery_bonus(order, user);
    if bonus == 0 {
        return Ok(PointsTransition::unchanged(user));
    }

    let mut new_user: User = user.clone();
    new_user.credit(bonus);

    let entry: LedgerEntry = LedgerEntry::earned(
        bonus,
        ActivitySource::Order,
        format!("Order {} delivered", short_order_ref(order.id())),
    )?
    .with_order(order.id());

    Ok(PointsTransition {
        user: new_user,
        points: bonus,
        entry: Some(entry),
    })
}

/// Cancels a non-terminal order. Redeemed points are not refunded.
///
/// # Errors
///
/// Returns `DomainError::InvalidStatusTransition` if the order is terminal.
pub fn cancel_order(order: &Order, now: OffsetDateTime) -> Result<Order, CoreError> {
    let mut new_order: Order = order.clone();
    new_order.transition(OrderStatus::Cancelled, now, None, None)?;
    Ok(new_order)
}
