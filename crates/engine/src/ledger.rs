// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The rewards ledger service.
//!
//! Entries are appended through the gateway, which assigns the id. The
//! service stamps the date. Nothing here changes a balance.

use std::sync::Arc;
use swadesi_ledger::{LedgerEntry, PointsActivity};
use swadesi_persistence::Gateway;
use time::OffsetDateTime;
use tracing::debug;

use crate::error::EngineError;
use crate::providers::Clock;

#[derive(Clone)]
pub struct RewardsLedger {
    gateway: Arc<Gateway>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RewardsLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardsLedger")
            .field("gateway", &self.gateway)
            .finish_non_exhaustive()
    }
}

impl RewardsLedger {
    #[must_use]
    pub fn new(gateway: Arc<Gateway>, clock: Arc<dyn Clock>) -> Self {
        Self { gateway, clock }
    }

    /// Persists `entry` for a user and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns the gateway error if the write fails.
    pub async fn record(
        &self,
        user_id: &str,
        entry: &LedgerEntry,
    ) -> Result<PointsActivity, EngineError> {
        let date: OffsetDateTime = self.clock.now();
        let activity: PointsActivity = self.gateway.create_activity(user_id, entry, date).await?;
        debug!(
            user_id,
            activity_id = activity.id(),
            kind = activity.kind().as_str(),
            amount = activity.amount(),
            "Ledger entry recorded"
        );
        Ok(activity)
    }

    /// Lists a user's entries, most recent first.
    ///
    /// # Errors
    ///
    /// Returns the gateway error if the read fails.
    pub async fn list(&self, user_id: &str) -> Result<Vec<PointsActivity>, EngineError> {
        let mut activity: Vec<PointsActivity> = self.gateway.get_activity(user_id).await?;
        sort_newest_first(&mut activity);
        Ok(activity)
    }
}

/// Stable sort by date, newest first. Entries sharing a date keep store order.
pub fn sort_newest_first(activity: &mut [PointsActivity]) {
    activity.sort_by(|a, b| b.date().cmp(&a.date()));
}
