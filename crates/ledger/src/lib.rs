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
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Rewards ledger records.
//!
//! Every change to a user's points produces exactly one ledger record.
//! A [`LedgerEntry`] is the unpersisted event; the store assigns an id and
//! a date and hands back an immutable [`PointsActivity`].

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// Whether points were gained or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Earned,
    Redeemed,
}

impl ActivityKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Earned => "earned",
            Self::Redeemed => "redeemed",
        }
    }
}

/// What produced a ledger record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivitySource {
    Order,
    BillUpload,
    Referral,
    Review,
    Streak,
    FirstPurchase,
    Bonus,
    Achievement,
    DailyChallenge,
    WeeklyChallenge,
    LevelUp,
}

impl ActivitySource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::BillUpload => "bill_upload",
            Self::Referral => "referral",
            Self::Review => "review",
            Self::Streak => "streak",
            Self::FirstPurchase => "first_purchase",
            Self::Bonus => "bonus",
            Self::Achievement => "achievement",
            Self::DailyChallenge => "daily_challenge",
            Self::WeeklyChallenge => "weekly_challenge",
            Self::LevelUp => "level_up",
        }
    }
}

/// Errors raised when building a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Ledger amounts must be strictly positive.
    ZeroAmount {
        /// The source of the rejected entry.
        source: ActivitySource,
    },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroAmount { source } => {
                write!(f, "Ledger entry from {} has zero amount", source.as_str())
            }
        }
    }
}

impl std::error::Error for LedgerError {}

/// A points event that has not been recorded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    kind: ActivityKind,
    amount: u64,
    source: ActivitySource,
    description: String,
    order_id: Option<String>,
    challenge_id: Option<String>,
}

impl LedgerEntry {
    /// Creates an earning entry.
    ///
    /// # Arguments
    ///
    /// * `amount` - Points earned, must be non-zero
    /// * `source` - What produced the points
    /// * `description` - User-facing description
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ZeroAmount` if `amount` is zero.
    pub fn earned(
        amount: u64,
        source: ActivitySource,
        description: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        Self::build(ActivityKind::Earned, amount, source, description.into())
    }

    /// Creates a redemption entry.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ZeroAmount` if `amount` is zero.
    pub fn redeemed(
        amount: u64,
        source: ActivitySource,
        description: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        Self::build(ActivityKind::Redeemed, amount, source, description.into())
    }

    fn build(
        kind: ActivityKind,
        amount: u64,
        source: ActivitySource,
        description: String,
    ) -> Result<Self, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount { source });
        }
        Ok(Self {
            kind,
            amount,
            source,
            description,
            order_id: None,
            challenge_id: None,
        })
    }

    #[must_use]
    pub fn with_order(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    #[must_use]
    pub fn with_challenge(mut self, challenge_id: impl Into<String>) -> Self {
        self.challenge_id = Some(challenge_id.into());
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ActivityKind {
        self.kind
    }

    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    #[must_use]
    pub const fn source(&self) -> ActivitySource {
        self.source
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    #[must_use]
    pub fn challenge_id(&self) -> Option<&str> {
        self.challenge_id.as_deref()
    }

    /// Seals the entry into a recorded activity.
    #[must_use]
    pub fn into_activity(self, id: impl Into<String>, date: OffsetDateTime) -> PointsActivity {
        PointsActivity {
            id: id.into(),
            kind: self.kind,
            amount: self.amount,
            source: self.source,
            description: self.description,
            date,
            order_id: self.order_id,
            achievement_id: None,
            challenge_id: self.challenge_id,
        }
    }
}

/// A recorded ledger entry. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsActivity {
    id: String,
    #[serde(rename = "type")]
    kind: ActivityKind,
    amount: u64,
    source: ActivitySource,
    description: String,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order_id: Option<String>,
    /// Only backend-written records carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    achievement_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    challenge_id: Option<String>,
}

impl PointsActivity {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> ActivityKind {
        self.kind
    }

    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    #[must_use]
    pub const fn source(&self) -> ActivitySource {
        self.source
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn date(&self) -> OffsetDateTime {
        self.date
    }

    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    #[must_use]
    pub fn achievement_id(&self) -> Option<&str> {
        self.achievement_id.as_deref()
    }

    #[must_use]
    pub fn challenge_id(&self) -> Option<&str> {
        self.challenge_id.as_deref()
    }
}

/// Earned and redeemed totals over a set of activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerTotals {
    pub earned: u64,
    pub redeemed: u64,
}

impl LedgerTotals {
    /// Sums a sequence of activities.
    #[must_use]
    pub fn from_activities<'a>(activities: impl IntoIterator<Item = &'a PointsActivity>) -> Self {
        activities
            .into_iter()
            .fold(Self::default(), |mut totals, activity| {
                match activity.kind {
                    ActivityKind::Earned => {
                        totals.earned = totals.earned.saturating_add(activity.amount);
                    }
                    ActivityKind::Redeemed => {
                        totals.redeemed = totals.redeemed.saturating_add(activity.amount);
                    }
                }
                totals
            })
    }

    /// Earned minus redeemed, floored at zero.
    #[must_use]
    pub const fn net(&self) -> u64 {
        self.earned.saturating_sub(self.redeemed)
    }
}

/// The last six characters of an order id, as shown to users.
#[must_use]
pub fn short_order_ref(order_id: &str) -> &str {
    let count: usize = order_id.chars().count();
    if count <= 6 {
        return order_id;
    }
    order_id
        .char_indices()
        .nth(count - 6)
        .map_or(order_id, |(start, _)| &order_id[start..])
}
