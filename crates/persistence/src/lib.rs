// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence for the Swadesi order and rewards engine.
//!
//! Two backends implement [`Store`]: [`RemoteStore`] talks to the HTTP
//! backend with a bearer credential, and [`LocalStore`] keeps the same
//! data in `SQLite`. The [`Gateway`] picks between them and falls back to
//! local storage for good once the backend cannot be reached.
//!
//! ## Error Handling
//!
//! Connectivity failures are the only errors that trigger fallback. An
//! authentication failure clears the shared credential and is reported to
//! the caller. Batch loads never fail as a whole: each collection that
//! cannot be fetched comes back empty.

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

mod config;
mod credential;
mod error;
mod gateway;
mod local;
mod remote;
mod store;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_NAMESPACE, GatewayConfig};
pub use credential::{Credential, CredentialSlot, CredentialStatus};
pub use error::PersistenceError;
pub use gateway::Gateway;
pub use local::{DataRecord, LocalStore};
pub use remote::RemoteStore;
pub use store::{BatchLoad, Store, StoreMode, UserData};
