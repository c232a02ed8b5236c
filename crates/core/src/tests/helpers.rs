// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use swadesi_domain::{Address, Cart, DeliveryPerson, Money, Product, User};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-14 10:00 UTC)
}

pub fn create_test_user(points: u64) -> User {
    User::new("user-1", "Asha Rao", "asha@example.com", points)
}

pub fn create_test_product(id: &str, rupees: u64, made_in_india: bool) -> Product {
    Product::new(
        id,
        format!("Product {id}"),
        Money::from_rupees(rupees),
        "Kerala Spices",
        made_in_india,
    )
}

pub fn create_test_cart(lines: &[(&str, u64, bool, u32)]) -> Cart {
    let mut cart: Cart = Cart::new();
    for (id, rupees, made_in_india, quantity) in lines {
        cart.add(create_test_product(id, *rupees, *made_in_india), *quantity)
            .unwrap();
    }
    cart
}

pub fn create_test_address(fee_rupees: u64, eta_minutes: Option<u32>) -> Address {
    Address::new(
        "addr-1",
        "12 MG Road, Bengaluru",
        "Indiranagar",
        Money::from_rupees(fee_rupees),
        eta_minutes,
    )
}

pub fn create_test_courier() -> DeliveryPerson {
    DeliveryPerson {
        name: String::from("Arjun Patel"),
        phone: String::from("+91 9876543210"),
        photo: String::from("courier.jpg"),
    }
}
