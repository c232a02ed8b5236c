// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage interface shared by the remote and local backends.

use async_trait::async_trait;
use swadesi_domain::{BillRecord, Cart, Order, User};
use swadesi_ledger::{LedgerEntry, PointsActivity};
use time::OffsetDateTime;

use crate::credential::{Credential, CredentialStatus};
use crate::error::PersistenceError;

/// Which backend is serving requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Remote,
    Local,
}

impl StoreMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

impl std::fmt::Display for StoreMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything loaded for a user when a session opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserData {
    pub cart: Cart,
    /// Most recent first.
    pub orders: Vec<Order>,
    /// Most recent first.
    pub bills: Vec<BillRecord>,
    /// Most recent first.
    pub activity: Vec<PointsActivity>,
}

/// Result of a batch load: the credential check and whatever was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLoad {
    pub status: CredentialStatus,
    pub data: UserData,
}

/// A backend able to hold one user's carts, orders, bills, and activity.
///
/// Every call may fail. Callers decide whether a failure is fatal.
#[async_trait]
pub trait Store: Send + Sync {
    /// The mode this backend represents.
    fn mode(&self) -> StoreMode;

    /// Checks whether `credential` is accepted by this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the check itself could not be carried out.
    async fn probe_credential(
        &self,
        credential: &Credential,
    ) -> Result<CredentialStatus, PersistenceError>;

    /// Loads a user profile. `Ok(None)` when the user is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, PersistenceError>;

    /// Writes a user profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn update_user(&self, user: &User) -> Result<(), PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn get_cart(&self, user_id: &str) -> Result<Cart, PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn save_cart(&self, user_id: &str, cart: &Cart) -> Result<(), PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn clear_cart(&self, user_id: &str) -> Result<(), PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn get_orders(&self, user_id: &str) -> Result<Vec<Order>, PersistenceError>;

    /// Stores a new order and returns the id assigned to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn create_order(&self, user_id: &str, order: &Order) -> Result<String, PersistenceError>;

    /// Replaces a stored order, matched by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no order has that id.
    async fn update_order(&self, user_id: &str, order: &Order) -> Result<(), PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn get_bills(&self, user_id: &str) -> Result<Vec<BillRecord>, PersistenceError>;

    /// Stores a new bill and returns the id assigned to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn create_bill(&self, user_id: &str, bill: &BillRecord)
    -> Result<String, PersistenceError>;

    /// Replaces a stored bill, matched by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no bill has that id.
    async fn update_bill(&self, user_id: &str, bill: &BillRecord) -> Result<(), PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn get_activity(&self, user_id: &str) -> Result<Vec<PointsActivity>, PersistenceError>;

    /// Records a ledger entry and returns it as stored, with its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn create_activity(
        &self,
        user_id: &str,
        entry: &LedgerEntry,
        date: OffsetDateTime,
    ) -> Result<PointsActivity, PersistenceError>;

    /// Removes the cart, orders, bills, and activity for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn clear_all(&self, user_id: &str) -> Result<(), PersistenceError>;
}
