// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_address, create_test_cart, create_test_user, test_now};
use crate::{
    CoreError, Placement, PricingConfig, authorize_redemption, quote_order, redeem_for_order,
};
use swadesi_domain::{Cart, DomainError, Money, OrderStatus, User};
use swadesi_ledger::ActivityKind;
use time::Duration;

#[test]
fn test_small_cart_without_address_pays_default_fee() {
    let cart: Cart = create_test_cart(&[("p1", 450, false, 1)]);
    let user: User = create_test_user(100);

    let placement: Placement = quote_order(
        &cart,
        Some(&user),
        0,
        None,
        test_now(),
        &PricingConfig::default(),
    )
    .unwrap();

    assert_eq!(placement.quote.delivery_fee, Money::from_rupees(40));
    assert_eq!(placement.quote.final_total, Money::from_rupees(490));
    assert_eq!(placement.order.total(), Money::from_rupees(490));
}

#[test]
fn test_cart_at_threshold_still_pays_fee() {
    let cart: Cart = create_test_cart(&[("p1", 500, false, 1)]);
    let user: User = create_test_user(100);

    let placement: Placement =
        quote_order(&cart, Some(&user), 0, None, test_now(), &PricingConfig::default()).unwrap();

    assert_eq!(placement.quote.delivery_fee, Money::from_rupees(40));
}

#[test]
fn test_made_in_india_bonus_points() {
    let cart: Cart = create_test_cart(&[("p1", 500, true, 2)]);
    let user: User = create_test_user(100);

    let placement: Placement =
        quote_order(&cart, Some(&user), 0, None, test_now(), &PricingConfig::default()).unwrap();

    assert_eq!(placement.quote.delivery_fee, Money::ZERO);
    assert_eq!(placement.quote.final_total, Money::from_rupees(1_000));
    assert_eq!(placement.quote.base_points, 100);
    assert_eq!(placement.quote.bonus_points, 50);
    assert_eq!(placement.quote.points_earned, 150);
    assert_eq!(placement.order.points_earned(), 150);
}

#[test]
fn test_base_points_use_final_total() {
    let cart: Cart = create_test_cart(&[("p1", 1_000, false, 1)]);
    let user: User = create_test_user(300);

    let placement: Placement = quote_order(
        &cart,
        Some(&user),
        200,
        None,
        test_now(),
        &PricingConfig::default(),
    )
    .unwrap();

    assert_eq!(placement.quote.final_total, Money::from_rupees(800));
    assert_eq!(placement.quote.points_earned, 80);
    assert_eq!(placement.order.points_used(), 200);
}

#[test]
fn test_redemption_larger_than_total_floors_at_zero() {
    let cart: Cart = create_test_cart(&[("p1", 30, false, 1)]);
    let user: User = create_test_user(500);

    let placement: Placement = quote_order(
        &cart,
        Some(&user),
        500,
        None,
        test_now(),
        &PricingConfig::default(),
    )
    .unwrap();

    assert_eq!(placement.quote.final_total, Money::ZERO);
    assert_eq!(placement.quote.points_earned, 0);
}

#[test]
fn test_address_supplies_fee_eta_and_location() {
    let cart: Cart = create_test_cart(&[("p1", 800, false, 1)]);
    let user: User = create_test_user(100);
    let address = create_test_address(25, Some(30));

    let placement: Placement = quote_order(
        &cart,
        Some(&user),
        0,
        Some(&address),
        test_now(),
        &PricingConfig::default(),
    )
    .unwrap();

    assert_eq!(placement.quote.delivery_fee, Money::from_rupees(25));
    assert_eq!(
        placement.order.estimated_delivery(),
        test_now() + Duration::minutes(30)
    );
    assert_eq!(
        placement.order.tracking_steps()[0].location.as_deref(),
        Some("Indiranagar")
    );
    assert_eq!(placement.order.delivery_address(), Some(&address));
}

#[test]
fn test_default_eta_and_location_without_address() {
    let cart: Cart = create_test_cart(&[("p1", 100, false, 1)]);
    let user: User = create_test_user(100);

    let placement: Placement =
        quote_order(&cart, Some(&user), 0, None, test_now(), &PricingConfig::default()).unwrap();

    assert_eq!(placement.order.status(), OrderStatus::Placed);
    assert_eq!(
        placement.order.estimated_delivery(),
        test_now() + Duration::minutes(45)
    );
    assert_eq!(
        placement.order.tracking_steps()[0].location.as_deref(),
        Some("Order Placed")
    );
}

#[test]
fn test_empty_cart_rejected() {
    let user: User = create_test_user(100);
    let result = quote_order(
        &Cart::new(),
        Some(&user),
        0,
        None,
        test_now(),
        &PricingConfig::default(),
    );
    assert_eq!(result, Err(CoreError::EmptyCart));
}

#[test]
fn test_missing_user_rejected() {
    let cart: Cart = create_test_cart(&[("p1", 100, false, 1)]);
    let result = quote_order(&cart, None, 0, None, test_now(), &PricingConfig::default());
    assert_eq!(result, Err(CoreError::NoActiveUser));
}

#[test]
fn test_authorize_redemption_rejects_overdraw() {
    let user: User = create_test_user(100);
    assert!(authorize_redemption(&user, 100).is_ok());
    assert_eq!(
        authorize_redemption(&user, 101),
        Err(CoreError::DomainViolation(DomainError::InsufficientPoints {
            requested: 101,
            available: 100,
        }))
    );
}

#[test]
fn test_redeem_for_order_debits_and_describes() {
    let cart: Cart = create_test_cart(&[("p1", 600, false, 1)]);
    let user: User = create_test_user(300);
    let placement: Placement = quote_order(
        &cart,
        Some(&user),
        120,
        None,
        test_now(),
        &PricingConfig::default(),
    )
    .unwrap();
    let order = placement.order.with_id("demo_order_1700000654321");

    let transition = redeem_for_order(&user, &order).unwrap();
    assert_eq!(transition.user.points(), 180);
    assert_eq!(transition.user.points_lifetime(), 300);

    let entry = transition.entry.unwrap();
    assert_eq!(entry.kind(), ActivityKind::Redeemed);
    assert_eq!(entry.amount(), 120);
    assert_eq!(entry.description(), "Points used for order 654321");
    assert_eq!(entry.order_id(), Some("demo_order_1700000654321"));
}

#[test]
fn test_redeem_for_order_without_points_is_noop() {
    let cart: Cart = create_test_cart(&[("p1", 600, false, 1)]);
    let user: User = create_test_user(300);
    let placement: Placement =
        quote_order(&cart, Some(&user), 0, None, test_now(), &PricingConfig::default()).unwrap();

    let transition = redeem_for_order(&user, &placement.order).unwrap();
    assert_eq!(transition.user, user);
    assert!(transition.entry.is_none());
}

#[test]
fn test_redeem_for_unpersisted_order_rejected() {
    let cart: Cart = create_test_cart(&[("p1", 600, false, 1)]);
    let user: User = create_test_user(300);
    let placement: Placement = quote_order(
        &cart,
        Some(&user),
        50,
        None,
        test_now(),
        &PricingConfig::default(),
    )
    .unwrap();

    assert_eq!(
        redeem_for_order(&user, &placement.order),
        Err(CoreError::DomainViolation(DomainError::OrderNotPersisted))
    );
}
