// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence gateway.
//!
//! The gateway routes every call to the remote backend while it is
//! reachable. The first connectivity failure pins the gateway to the local
//! store for the rest of its life, and the failed call is retried once
//! against local storage. Other remote failures are returned unchanged.

use std::sync::atomic::{AtomicBool, Ordering};
use swadesi_domain::{BillRecord, Cart, Order, User};
use swadesi_ledger::{LedgerEntry, PointsActivity};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::credential::{Credential, CredentialSlot, CredentialStatus};
use crate::error::PersistenceError;
use crate::local::LocalStore;
use crate::remote::RemoteStore;
use crate::store::{BatchLoad, Store, StoreMode, UserData};

/// Calls `$method` on the active backend, retrying once on the local
/// store if the remote call fails with a connectivity error.
macro_rules! dispatch {
    ($self:ident . $method:ident ( $($arg:expr),* )) => {{
        match $self.active_remote() {
            Some(remote) => match remote.$method($($arg),*).await {
                Err(err) if err.is_connectivity() => {
                    $self.enter_fallback(&err);
                    $self.local.$method($($arg),*).await
                }
                other => other,
            },
            None => $self.local.$method($($arg),*).await,
        }
    }};
}

/// Single entry point for all persistence.
pub struct Gateway {
    remote: Option<Box<dyn Store>>,
    local: Box<dyn Store>,
    fallback: AtomicBool,
    credentials: CredentialSlot,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("mode", &self.mode())
            .field("has_remote", &self.remote.is_some())
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Creates a gateway over explicit backends.
    #[must_use]
    pub fn new(
        remote: Option<Box<dyn Store>>,
        local: Box<dyn Store>,
        credentials: CredentialSlot,
    ) -> Self {
        Self {
            remote,
            local,
            fallback: AtomicBool::new(false),
            credentials,
        }
    }

    /// Creates a gateway that only ever uses the local store.
    #[must_use]
    pub fn local_only(local: LocalStore, credentials: CredentialSlot) -> Self {
        Self::new(None, Box::new(local), credentials)
    }

    /// Builds both backends from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the local database cannot be opened or the HTTP
    /// client cannot be built.
    pub fn from_config(
        config: &GatewayConfig,
        credentials: CredentialSlot,
    ) -> Result<Self, PersistenceError> {
        let local: LocalStore =
            LocalStore::open(config.database_path.as_deref(), &config.namespace)?;
        let remote: Option<Box<dyn Store>> = match config.backend_url.as_deref() {
            Some(url) => {
                let store: RemoteStore =
                    RemoteStore::new(url, config.request_timeout, credentials.clone())?;
                Some(Box::new(store))
            }
            None => None,
        };
        info!(
            remote = config.backend_url.as_deref().unwrap_or("none"),
            namespace = %config.namespace,
            "Persistence gateway configured"
        );
        Ok(Self::new(remote, Box::new(local), credentials))
    }

    /// The mode currently serving requests.
    #[must_use]
    pub fn mode(&self) -> StoreMode {
        if self.active_remote().is_some() {
            StoreMode::Remote
        } else {
            StoreMode::Local
        }
    }

    /// True once the gateway has fallen back from an unreachable backend.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback.load(Ordering::SeqCst)
    }

    #[must_use]
    pub const fn credentials(&self) -> &CredentialSlot {
        &self.credentials
    }

    pub fn set_credential(&self, credential: Credential) {
        self.credentials.set(credential);
    }

    pub fn clear_credential(&self) {
        self.credentials.clear();
    }

    fn active_remote(&self) -> Option<&dyn Store> {
        if self.is_fallback() {
            None
        } else {
            self.remote.as_deref()
        }
    }

    fn enter_fallback(&self, err: &PersistenceError) {
        if !self.fallback.swap(true, Ordering::SeqCst) {
            warn!(error = %err, "Backend unreachable, continuing with local storage");
        }
    }

    /// Checks the current credential against the active backend.
    ///
    /// Never fails: any error during the check counts as `Invalid`.
    pub async fn check_health(&self) -> CredentialStatus {
        let Some(credential) = self.credentials.get() else {
            return CredentialStatus::Missing;
        };
        match dispatch!(self.probe_credential(&credential)) {
            Ok(status) => status,
            Err(err) => {
                warn!(error = %err, "Credential check failed");
                CredentialStatus::Invalid
            }
        }
    }

    /// Loads all of a user's data in one batch.
    ///
    /// The credential is checked first and nothing is fetched unless it is
    /// valid. Each fetch is independent: one that fails is logged and
    /// yields an empty collection.
    pub async fn load_user_data(&self, user_id: &str) -> BatchLoad {
        let status: CredentialStatus = self.check_health().await;
        if status != CredentialStatus::Valid {
            info!(user_id, ?status, "Skipping data load without a valid credential");
            return BatchLoad {
                status,
                data: UserData::default(),
            };
        }

        let (cart, orders, bills, activity) = futures::join!(
            self.get_cart(user_id),
            self.get_orders(user_id),
            self.get_bills(user_id),
            self.get_activity(user_id),
        );

        BatchLoad {
            status,
            data: UserData {
                cart: or_empty(cart, "cart"),
                orders: or_empty(orders, "orders"),
                bills: or_empty(bills, "bills"),
                activity: or_empty(activity, "activity"),
            },
        }
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, PersistenceError> {
        dispatch!(self.get_user(user_id))
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn update_user(&self, user: &User) -> Result<(), PersistenceError> {
        dispatch!(self.update_user(user))
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn get_cart(&self, user_id: &str) -> Result<Cart, PersistenceError> {
        dispatch!(self.get_cart(user_id))
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn save_cart(&self, user_id: &str, cart: &Cart) -> Result<(), PersistenceError> {
        dispatch!(self.save_cart(user_id, cart))
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn clear_cart(&self, user_id: &str) -> Result<(), PersistenceError> {
        dispatch!(self.clear_cart(user_id))
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn get_orders(&self, user_id: &str) -> Result<Vec<Order>, PersistenceError> {
        dispatch!(self.get_orders(user_id))
    }

    /// Stores a new order and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn create_order(
        &self,
        user_id: &str,
        order: &Order,
    ) -> Result<String, PersistenceError> {
        dispatch!(self.create_order(user_id, order))
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn update_order(&self, user_id: &str, order: &Order) -> Result<(), PersistenceError> {
        dispatch!(self.update_order(user_id, order))
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn get_bills(&self, user_id: &str) -> Result<Vec<BillRecord>, PersistenceError> {
        dispatch!(self.get_bills(user_id))
    }

    /// Stores a new bill and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn create_bill(
        &self,
        user_id: &str,
        bill: &BillRecord,
    ) -> Result<String, PersistenceError> {
        dispatch!(self.create_bill(user_id, bill))
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn update_bill(
        &self,
        user_id: &str,
        bill: &BillRecord,
    ) -> Result<(), PersistenceError> {
        dispatch!(self.update_bill(user_id, bill))
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn get_activity(
        &self,
        user_id: &str,
    ) -> Result<Vec<PointsActivity>, PersistenceError> {
        dispatch!(self.get_activity(user_id))
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn create_activity(
        &self,
        user_id: &str,
        entry: &LedgerEntry,
        date: OffsetDateTime,
    ) -> Result<PointsActivity, PersistenceError> {
        dispatch!(self.create_activity(user_id, entry, date))
    }

    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn clear_all(&self, user_id: &str) -> Result<(), PersistenceError> {
        dispatch!(self.clear_all(user_id))
    }
}

fn or_empty<T: Default>(result: Result<T, PersistenceError>, what: &str) -> T {
    result.unwrap_or_else(|err| {
        warn!(error = %err, what, "Failed to load, using empty");
        T::default()
    })
}
