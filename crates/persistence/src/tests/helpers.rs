// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::{Path, PathBuf};
use swadesi_domain::{BillRecord, Cart, CartItem, Money, NewOrder, Order, Product};
use swadesi_ledger::{ActivitySource, LedgerEntry};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{CredentialSlot, LocalStore};

pub const TEST_USER: &str = "user-1";
pub const GOOD_TOKEN: &str = "good-token";

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-14 10:00 UTC)
}

pub fn create_test_product(id: &str, rupees: u64) -> Product {
    Product::new(
        id,
        format!("Product {id}"),
        Money::from_rupees(rupees),
        "Khadi Gramodyog",
        true,
    )
}

pub fn create_test_cart() -> Cart {
    let mut cart: Cart = Cart::new();
    cart.add(create_test_product("p1", 250), 2).unwrap();
    cart.add(create_test_product("p2", 90), 1).unwrap();
    cart
}

pub fn create_test_order(total_rupees: u64) -> Order {
    let item: CartItem = CartItem::new(create_test_product("p1", total_rupees), 1).unwrap();
    Order::from_new(NewOrder {
        items: vec![item],
        total: Money::from_rupees(total_rupees),
        points_earned: 15,
        points_used: 0,
        placed_at: test_now(),
        estimated_delivery: test_now() + time::Duration::minutes(45),
        delivery_address: None,
        placed_location: String::from("Order Placed"),
    })
}

pub fn create_test_bill() -> BillRecord {
    BillRecord::new("Fab India", Money::from_rupees(1_200), 60, test_now())
}

pub fn create_test_entry(amount: u64) -> LedgerEntry {
    LedgerEntry::earned(amount, ActivitySource::Bonus, "Test bonus").unwrap()
}

pub fn create_test_local_store() -> LocalStore {
    LocalStore::new_in_memory(crate::DEFAULT_NAMESPACE).unwrap()
}

pub fn create_test_slot(token: &str) -> CredentialSlot {
    CredentialSlot::new(Some(crate::Credential::new(token)))
}

pub fn temp_database_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "swadesi_{label}_{}_{}.db",
        std::process::id(),
        rand::random::<u64>()
    ))
}

pub fn remove_database(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
