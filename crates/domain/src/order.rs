// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order status tracking and transition logic.
//!
//! An order moves forward through a fixed progression until it is
//! delivered. Cancellation is reachable from any non-terminal state.
//! The tracking history is append-only and always begins with `placed`.

use crate::error::DomainError;
use crate::money::Money;
use crate::types::{Address, CartItem, DeliveryPerson};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Order lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The automatic progression, in order.
    pub const PROGRESSION: [Self; 5] = [
        Self::Placed,
        Self::Confirmed,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// The statuses applied after placement, in order.
    pub const ADVANCEMENTS: [Self; 4] = [
        Self::Confirmed,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOrderStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "placed" => Ok(Self::Placed),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidOrderStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Human-readable label used in notifications.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out for delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Position in the progression. `None` for `Cancelled`.
    #[must_use]
    pub const fn rank(&self) -> Option<usize> {
        match self {
            Self::Placed => Some(0),
            Self::Confirmed => Some(1),
            Self::Preparing => Some(2),
            Self::OutForDelivery => Some(3),
            Self::Delivered => Some(4),
            Self::Cancelled => None,
        }
    }

    /// The next status in the automatic progression.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Placed => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Preparing),
            Self::Preparing => Some(Self::OutForDelivery),
            Self::OutForDelivery => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// The tracking message recorded when an order enters this status.
    #[must_use]
    pub const fn tracking_message(&self) -> &'static str {
        match self {
            Self::Placed => "Order placed successfully",
            Self::Confirmed => "Order confirmed by restaurant",
            Self::Preparing => "Food is being prepared",
            Self::OutForDelivery => "Order picked up by delivery partner",
            Self::Delivered => "Order delivered successfully",
            Self::Cancelled => "Order cancelled",
        }
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Forward moves along the progression are allowed, including skips.
    /// `Cancelled` is allowed from any non-terminal status.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid: bool = match (self.rank(), new_status.rank()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, Some(_)) => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "orders only move forward through the progression".to_string(),
            })
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingStep {
    pub status: OrderStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub message: String,
}

/// Everything needed to create an order, computed at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub items: Vec<CartItem>,
    pub total: Money,
    pub points_earned: u64,
    pub points_used: u64,
    pub placed_at: OffsetDateTime,
    pub estimated_delivery: OffsetDateTime,
    pub delivery_address: Option<Address>,
    pub placed_location: String,
}

/// A placed order.
///
/// Items, totals, and points are fixed at placement. Only the status,
/// the tracking history, the courier, and the delivery time change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    id: String,
    items: Vec<CartItem>,
    total: Money,
    status: OrderStatus,
    #[serde(with = "time::serde::rfc3339")]
    placed_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    estimated_delivery: OffsetDateTime,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    delivery_time: Option<OffsetDateTime>,
    points_earned: u64,
    #[serde(default)]
    points_used: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivery_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivery_person: Option<DeliveryPerson>,
    tracking_steps: Vec<TrackingStep>,
}

impl Order {
    /// Creates an unpersisted order in `placed` with its first tracking step.
    #[must_use]
    pub fn from_new(new_order: NewOrder) -> Self {
        let first_step: TrackingStep = TrackingStep {
            status: OrderStatus::Placed,
            timestamp: new_order.placed_at,
            location: Some(new_order.placed_location),
            message: OrderStatus::Placed.tracking_message().to_string(),
        };
        Self {
            id: String::new(),
            items: new_order.items,
            total: new_order.total,
            status: OrderStatus::Placed,
            placed_at: new_order.placed_at,
            estimated_delivery: new_order.estimated_delivery,
            delivery_time: None,
            points_earned: new_order.points_earned,
            points_used: new_order.points_used,
            delivery_address: new_order.delivery_address,
            delivery_person: None,
            tracking_steps: vec![first_step],
        }
    }

    /// Returns the order with the id assigned by the store.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The store-assigned id. Empty before persistence.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The charged amount after delivery fee and redemption.
    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }

    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    #[must_use]
    pub const fn placed_at(&self) -> OffsetDateTime {
        self.placed_at
    }

    #[must_use]
    pub const fn estimated_delivery(&self) -> OffsetDateTime {
        self.estimated_delivery
    }

    #[must_use]
    pub const fn delivery_time(&self) -> Option<OffsetDateTime> {
        self.delivery_time
    }

    #[must_use]
    pub const fn points_earned(&self) -> u64 {
        self.points_earned
    }

    #[must_use]
    pub const fn points_used(&self) -> u64 {
        self.points_used
    }

    #[must_use]
    pub const fn delivery_address(&self) -> Option<&Address> {
        self.delivery_address.as_ref()
    }

    #[must_use]
    pub const fn delivery_person(&self) -> Option<&DeliveryPerson> {
        self.delivery_person.as_ref()
    }

    #[must_use]
    pub fn tracking_steps(&self) -> &[TrackingStep] {
        &self.tracking_steps
    }

    /// Moves the order to `status`, appending one tracking step.
    ///
    /// Entering `Delivered` sets the delivery time. A courier passed in is
    /// stored only when entering `OutForDelivery`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the move is not allowed.
    pub fn transition(
        &mut self,
        status: OrderStatus,
        at: OffsetDateTime,
        location: Option<String>,
        courier: Option<DeliveryPerson>,
    ) -> Result<(), DomainError> {
        self.status.validate_transition(status)?;
        self.status = status;
        self.tracking_steps.push(TrackingStep {
            status,
            timestamp: at,
            location,
            message: status.tracking_message().to_string(),
        });
        match status {
            OrderStatus::OutForDelivery => {
                if courier.is_some() {
                    self.delivery_person = courier;
                }
            }
            OrderStatus::Delivered => self.delivery_time = Some(at),
            _ => {}
        }
        Ok(())
    }
}
