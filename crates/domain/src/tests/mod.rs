// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{Cart, Money, NewOrder, Order, Product};
use time::OffsetDateTime;
use time::macros::datetime;

pub(crate) fn test_now() -> OffsetDateTime {
    datetime!(2026-03-14 10:00 UTC)
}

pub(crate) fn create_test_product(id: &str, rupees: u64, made_in_india: bool) -> Product {
    Product::new(id, format!("Product {id}"), Money::from_rupees(rupees), "Test Vendor", made_in_india)
}

pub(crate) fn create_test_order() -> Order {
    let mut cart: Cart = Cart::new();
    cart.add(create_test_product("p1", 450, true), 1).unwrap();
    Order::from_new(NewOrder {
        items: cart.into_items(),
        total: Money::from_rupees(490),
        points_earned: 71,
        points_used: 0,
        placed_at: test_now(),
        estimated_delivery: test_now() + time::Duration::minutes(45),
        delivery_address: None,
        placed_location: String::from("Order Placed"),
    })
}
