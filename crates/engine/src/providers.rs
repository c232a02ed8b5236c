// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Injectable sources of time and courier assignment.

use swadesi_domain::DeliveryPerson;
use time::OffsetDateTime;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Chooses the courier for an order leaving the restaurant.
pub trait Dispatch: Send + Sync {
    fn assign(&self) -> DeliveryPerson;
}

const COURIER_PHONE: &str = "+91 9876543210";
const COURIER_PHOTO: &str =
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop&crop=face";
const COURIER_NAMES: [&str; 4] = ["Rajesh Kumar", "Priya Singh", "Arjun Patel", "Meera Sharma"];

/// Picks uniformly at random from a fixed roster.
#[derive(Debug, Clone)]
pub struct RosterDispatch {
    roster: Vec<DeliveryPerson>,
}

impl RosterDispatch {
    /// Uses `roster`, or the built-in roster if it is empty.
    #[must_use]
    pub fn with_roster(roster: Vec<DeliveryPerson>) -> Self {
        if roster.is_empty() {
            Self::default()
        } else {
            Self { roster }
        }
    }

    #[must_use]
    pub fn roster(&self) -> &[DeliveryPerson] {
        &self.roster
    }
}

impl Default for RosterDispatch {
    fn default() -> Self {
        let roster: Vec<DeliveryPerson> = COURIER_NAMES
            .iter()
            .map(|name| DeliveryPerson {
                name: (*name).to_string(),
                phone: COURIER_PHONE.to_string(),
                photo: COURIER_PHOTO.to_string(),
            })
            .collect();
        Self { roster }
    }
}

impl Dispatch for RosterDispatch {
    fn assign(&self) -> DeliveryPerson {
        let len: u64 = u64::try_from(self.roster.len()).unwrap_or(u64::MAX).max(1);
        let index: usize = usize::try_from(rand::random::<u64>() % len).unwrap_or(0);
        self.roster
            .get(index)
            .or_else(|| self.roster.first())
            .cloned()
            .unwrap_or_else(|| DeliveryPerson {
                name: COURIER_NAMES[0].to_string(),
                phone: COURIER_PHONE.to_string(),
                photo: COURIER_PHOTO.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_has_four_couriers() {
        let dispatch: RosterDispatch = RosterDispatch::default();
        assert_eq!(dispatch.roster().len(), 4);
        assert!(dispatch.roster().iter().all(|p| p.phone == COURIER_PHONE));
    }

    #[test]
    fn test_assign_always_picks_from_roster() {
        let dispatch: RosterDispatch = RosterDispatch::default();
        for _ in 0..50 {
            let courier: DeliveryPerson = dispatch.assign();
            assert!(dispatch.roster().contains(&courier));
        }
    }

    #[test]
    fn test_empty_roster_falls_back_to_default() {
        let dispatch: RosterDispatch = RosterDispatch::with_roster(Vec::new());
        assert_eq!(dispatch.roster().len(), 4);
    }
}
