// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use swadesi_domain::{BillRecord, Order, User};
use swadesi_ledger::LedgerEntry;

/// The outcome of a points-affecting transition.
///
/// Holds the updated user and, when points moved, the ledger entry to
/// record. The input user is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsTransition {
    /// The user after the transition.
    pub user: User,
    /// Points credited or debited.
    pub points: u64,
    /// The ledger entry to record, if any points moved.
    pub entry: Option<LedgerEntry>,
}

impl PointsTransition {
    /// A transition that moved no points.
    #[must_use]
    pub fn unchanged(user: &User) -> Self {
        Self {
            user: user.clone(),
            points: 0,
            entry: None,
        }
    }
}

/// The outcome of advancing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceResult {
    /// The order after the transition.
    pub order: Order,
    /// The delivery award. Present only when the order was delivered.
    pub award: Option<PointsTransition>,
}

/// The outcome of verifying a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillVerification {
    pub bill: BillRecord,
    pub award: PointsTransition,
}
