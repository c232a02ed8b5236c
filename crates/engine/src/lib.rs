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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! Session engine for the Swadesi marketplace client.
//!
//! Wires the pure transitions in `swadesi` to the persistence gateway:
//! checkout, timed order advancement, bill verification, reward
//! redemption, and data reset, with notifications for the user.

mod config;
mod error;
mod ledger;
mod notify;
mod providers;
mod scheduler;
mod session;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;
pub use error::EngineError;
pub use ledger::{RewardsLedger, sort_newest_first};
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use providers::{Clock, Dispatch, RosterDispatch, SystemClock};
pub use scheduler::{Scheduler, TaskKey};
pub use session::{EngineDeps, Session};
