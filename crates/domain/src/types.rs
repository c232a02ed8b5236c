// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::money::Money;
use crate::standing::{Standing, Tier, compute_standing};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

const fn default_true() -> bool {
    true
}

/// A catalogue product as offered by a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub vendor: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub made_in_india: bool,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl Product {
    /// Creates an in-stock product with empty descriptive fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        vendor: impl Into<String>,
        made_in_india: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            vendor: vendor.into(),
            category: String::new(),
            description: String::new(),
            image: String::new(),
            made_in_india,
            in_stock: true,
        }
    }
}

/// A product and a quantity of at least one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    quantity: u32,
}

impl CartItem {
    /// Creates a cart line.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` if `quantity` is zero.
    pub fn new(product: Product, quantity: u32) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity: 0 });
        }
        Ok(Self { product, quantity })
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price times quantity.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

/// The user's pending cart.
///
/// Lines are unique by product id. A line never holds quantity zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds a cart from stored lines, dropping empty lines and merging
    /// duplicates.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart: Self = Self::new();
        for item in items {
            if item.quantity > 0 {
                cart.merge(item.product, item.quantity);
            }
        }
        cart
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Adds `quantity` of `product`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` if `quantity` is zero.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity: 0 });
        }
        self.merge(product, quantity);
        Ok(())
    }

    fn merge(&mut self, product: Product, quantity: u32) {
        if let Some(line) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem { product, quantity });
        }
    }

    /// Sets the quantity of a line. A quantity of zero or less removes it.
    ///
    /// Returns `true` if a line with `product_id` existed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` if `quantity` exceeds `u32::MAX`.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<bool, DomainError> {
        if quantity <= 0 {
            return Ok(self.remove(product_id));
        }
        let quantity: u32 =
            u32::try_from(quantity).map_err(|_| DomainError::InvalidQuantity { quantity })?;
        match self.items.iter_mut().find(|i| i.product.id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes a line. Returns `true` if it existed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before: usize = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of line totals over lines flagged as made in India.
    #[must_use]
    pub fn made_in_india_total(&self) -> Money {
        self.items
            .iter()
            .filter(|i| i.product.made_in_india)
            .map(CartItem::line_total)
            .sum()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}

/// A saved delivery address from the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    #[serde(default)]
    pub nickname: String,
    pub full_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub delivery_area: String,
    /// Minutes from placement to expected delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_time: Option<u32>,
    pub delivery_fee: Money,
    #[serde(default)]
    pub is_default: bool,
}

impl Address {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        full_address: impl Into<String>,
        delivery_area: impl Into<String>,
        delivery_fee: Money,
        estimated_delivery_time: Option<u32>,
    ) -> Self {
        Self {
            id: id.into(),
            nickname: String::new(),
            full_address: full_address.into(),
            apartment: None,
            landmark: None,
            instructions: None,
            contact_person: None,
            contact_phone: None,
            delivery_area: delivery_area.into(),
            estimated_delivery_time,
            delivery_fee,
            is_default: false,
        }
    }
}

/// The courier assigned once an order is out for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPerson {
    pub name: String,
    pub phone: String,
    pub photo: String,
}

/// A purchase receipt uploaded for points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    /// Empty until the store assigns one.
    #[serde(default)]
    pub id: String,
    pub vendor_name: String,
    pub amount: Money,
    pub points_earned: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub uploaded_at: OffsetDateTime,
    #[serde(default)]
    pub verified: bool,
}

impl BillRecord {
    /// Creates an unverified, unpersisted bill.
    #[must_use]
    pub fn new(
        vendor_name: impl Into<String>,
        amount: Money,
        points_earned: u64,
        uploaded_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: String::new(),
            vendor_name: vendor_name.into(),
            amount,
            points_earned,
            uploaded_at,
            verified: false,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// The signed-in user's profile and points aggregate.
///
/// `points_tier` and `level` are never set directly: every change to
/// `points_lifetime` recomputes both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    points: u64,
    #[serde(default)]
    points_lifetime: u64,
    #[serde(default)]
    points_tier: Tier,
    #[serde(default = "default_level")]
    level: u32,
    #[serde(default)]
    streak_days: u32,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    last_login_date: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default)]
    completed_challenges: Vec<String>,
    #[serde(default)]
    daily_login_count: u32,
    #[serde(default)]
    referral_count: u32,
    #[serde(default)]
    review_count: u32,
    #[serde(default)]
    bill_upload_count: u32,
    #[serde(default)]
    total_spent: Money,
}

const fn default_level() -> u32 {
    1
}

impl User {
    /// Creates a user with the given starting balance.
    ///
    /// Lifetime points start equal to the balance.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        starting_points: u64,
    ) -> Self {
        let standing: Standing = compute_standing(starting_points);
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            points: starting_points,
            points_lifetime: starting_points,
            points_tier: standing.tier,
            level: standing.level,
            streak_days: 0,
            last_login_date: None,
            address: None,
            completed_challenges: Vec::new(),
            daily_login_count: 0,
            referral_count: 0,
            review_count: 0,
            bill_upload_count: 0,
            total_spent: Money::ZERO,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Spendable balance.
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    #[must_use]
    pub const fn points_lifetime(&self) -> u64 {
        self.points_lifetime
    }

    #[must_use]
    pub const fn points_tier(&self) -> Tier {
        self.points_tier
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn standing(&self) -> Standing {
        Standing {
            level: self.level,
            tier: self.points_tier,
        }
    }

    #[must_use]
    pub const fn streak_days(&self) -> u32 {
        self.streak_days
    }

    #[must_use]
    pub const fn last_login_date(&self) -> Option<OffsetDateTime> {
        self.last_login_date
    }

    /// The user's stored free-text address, if any.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    #[must_use]
    pub fn completed_challenges(&self) -> &[String] {
        &self.completed_challenges
    }

    #[must_use]
    pub fn has_completed(&self, challenge_id: &str) -> bool {
        self.completed_challenges.iter().any(|c| c == challenge_id)
    }

    #[must_use]
    pub const fn daily_login_count(&self) -> u32 {
        self.daily_login_count
    }

    #[must_use]
    pub const fn referral_count(&self) -> u32 {
        self.referral_count
    }

    #[must_use]
    pub const fn review_count(&self) -> u32 {
        self.review_count
    }

    #[must_use]
    pub const fn bill_upload_count(&self) -> u32 {
        self.bill_upload_count
    }

    #[must_use]
    pub const fn total_spent(&self) -> Money {
        self.total_spent
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub const fn with_last_login_date(mut self, date: OffsetDateTime) -> Self {
        self.last_login_date = Some(date);
        self
    }

    /// Whether the spendable balance covers `amount`.
    #[must_use]
    pub const fn can_afford(&self, amount: u64) -> bool {
        amount <= self.points
    }

    /// Adds earned points to both the balance and the lifetime total.
    pub fn credit(&mut self, amount: u64) {
        self.points = self.points.saturating_add(amount);
        self.points_lifetime = self.points_lifetime.saturating_add(amount);
        self.recompute_standing();
    }

    /// Removes points from the spendable balance. Lifetime is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientPoints` if `amount` exceeds the balance.
    pub const fn debit(&mut self, amount: u64) -> Result<(), DomainError> {
        if amount > self.points {
            return Err(DomainError::InsufficientPoints {
                requested: amount,
                available: self.points,
            });
        }
        self.points -= amount;
        Ok(())
    }

    /// Applies defaults to a freshly loaded profile.
    ///
    /// A zero lifetime total falls back to the balance, then to
    /// `default_lifetime`. Tier and level are recomputed.
    pub fn normalize(&mut self, default_lifetime: u64) {
        if self.points_lifetime == 0 {
            self.points_lifetime = if self.points > 0 {
                self.points
            } else {
                default_lifetime
            };
        }
        self.recompute_standing();
    }

    /// Resets balance and lifetime to `points` and clears the streak.
    pub fn reset_points(&mut self, points: u64) {
        self.points = points;
        self.points_lifetime = points;
        self.streak_days = 0;
        self.recompute_standing();
    }

    /// Marks a challenge completed. Returns `false` if it already was.
    pub fn complete_challenge(&mut self, challenge_id: &str) -> bool {
        if self.has_completed(challenge_id) {
            return false;
        }
        self.completed_challenges.push(challenge_id.to_string());
        true
    }

    /// Records a daily login at `now`.
    pub const fn record_daily_login(&mut self, now: OffsetDateTime) {
        self.daily_login_count = self.daily_login_count.saturating_add(1);
        self.last_login_date = Some(now);
    }

    pub const fn record_bill_upload(&mut self) {
        self.bill_upload_count = self.bill_upload_count.saturating_add(1);
    }

    pub const fn record_spend(&mut self, amount: Money) {
        self.total_spent = self.total_spent.saturating_add(amount);
    }

    fn recompute_standing(&mut self) {
        let standing: Standing = compute_standing(self.points_lifetime);
        self.points_tier = standing.tier;
        self.level = standing.level;
    }
}
