// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The string is not a known order status.
    InvalidOrderStatus {
        /// The rejected status string.
        status: String,
    },
    /// The string is not a known reward tier.
    InvalidTier {
        /// The rejected tier string.
        tier: String,
    },
    /// An order status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// A cart quantity is outside the representable range.
    InvalidQuantity {
        /// The rejected quantity.
        quantity: i64,
    },
    /// A monetary amount is negative, not finite, or too large.
    InvalidAmount {
        /// The rejected value, as provided.
        value: String,
    },
    /// A redemption requested more points than the user holds.
    InsufficientPoints {
        /// Points requested.
        requested: u64,
        /// Points available at authorization time.
        available: u64,
    },
    /// The operation needs an order id assigned by persistence.
    OrderNotPersisted,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOrderStatus { status } => write!(f, "Invalid order status: {status}"),
            Self::InvalidTier { tier } => write!(f, "Invalid tier: {tier}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from {from} to {to}: {reason}")
            }
            Self::InvalidQuantity { quantity } => {
                write!(f, "Invalid quantity: {quantity}")
            }
            Self::InvalidAmount { value } => write!(f, "Invalid amount: {value}"),
            Self::InsufficientPoints {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient points: requested {requested}, available {available}"
                )
            }
            Self::OrderNotPersisted => write!(f, "Order has not been persisted yet"),
        }
    }
}

impl std::error::Error for DomainError {}
