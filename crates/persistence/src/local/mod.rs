// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite`-backed local store.
//!
//! Used on its own when no backend is configured, and as the fallback
//! once the backend proves unreachable. Data is partitioned by namespace
//! and user id. New orders, bills, and activity are kept most recent first.

mod records;
mod schema;
mod sqlite;

use async_trait::async_trait;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use swadesi_domain::{BillRecord, Cart, Order, User};
use swadesi_ledger::{LedgerEntry, PointsActivity};
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::credential::{Credential, CredentialStatus};
use crate::error::PersistenceError;
use crate::store::{Store, StoreMode};

pub use records::DataRecord;

static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

fn generate_id(kind: &str) -> String {
    let timestamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("demo_{kind}_{timestamp}_{}", rand::random::<u32>())
}

/// Local persistence on a single `SQLite` connection.
pub struct LocalStore {
    conn: Mutex<SqliteConnection>,
    namespace: String,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl LocalStore {
    /// Opens a file-backed store, or a private in-memory one when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: Option<&Path>, namespace: &str) -> Result<Self, PersistenceError> {
        match path {
            Some(path) => Self::new_with_file(path, namespace),
            None => Self::new_in_memory(namespace),
        }
    }

    /// Creates a store on a fresh in-memory database.
    ///
    /// Each call gets its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory(namespace: &str) -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:swadesi_local_{db_id}?mode=memory&cache=shared");
        let conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        Ok(Self {
            conn: Mutex::new(conn),
            namespace: namespace.to_string(),
        })
    }

    /// Creates a store on a database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the database
    /// cannot be initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P, namespace: &str) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::DatabaseConnectionFailed("Invalid database path".to_string())
        })?;
        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            namespace: namespace.to_string(),
        })
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns a copy of everything stored for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document cannot be read.
    pub async fn snapshot(&self, user_id: &str) -> Result<DataRecord, PersistenceError> {
        let mut conn = self.conn.lock().await;
        records::load_record(&mut conn, &self.namespace, user_id)
    }

    async fn modify<T, F>(&self, user_id: &str, change: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut DataRecord) -> Result<T, PersistenceError> + Send,
    {
        let mut conn = self.conn.lock().await;
        records::modify_record(&mut conn, &self.namespace, user_id, change)
    }
}

#[async_trait]
impl Store for LocalStore {
    fn mode(&self) -> StoreMode {
        StoreMode::Local
    }

    async fn probe_credential(
        &self,
        credential: &Credential,
    ) -> Result<CredentialStatus, PersistenceError> {
        if credential.is_empty() {
            Ok(CredentialStatus::Invalid)
        } else {
            Ok(CredentialStatus::Valid)
        }
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, PersistenceError> {
        let mut conn = self.conn.lock().await;
        records::load_user(&mut conn, &self.namespace, user_id)
    }

    async fn update_user(&self, user: &User) -> Result<(), PersistenceError> {
        let mut conn = self.conn.lock().await;
        records::store_user(&mut conn, &self.namespace, user)
    }

    async fn get_cart(&self, user_id: &str) -> Result<Cart, PersistenceError> {
        Ok(self.snapshot(user_id).await?.cart)
    }

    async fn save_cart(&self, user_id: &str, cart: &Cart) -> Result<(), PersistenceError> {
        self.modify(user_id, |record| {
            record.cart = cart.clone();
            Ok(())
        })
        .await
    }

    async fn clear_cart(&self, user_id: &str) -> Result<(), PersistenceError> {
        self.modify(user_id, |record| {
            record.cart.clear();
            Ok(())
        })
        .await
    }

    async fn get_orders(&self, user_id: &str) -> Result<Vec<Order>, PersistenceError> {
        Ok(self.snapshot(user_id).await?.orders)
    }

    async fn create_order(&self, user_id: &str, order: &Order) -> Result<String, PersistenceError> {
        let id: String = generate_id("order");
        let stored: Order = order.clone().with_id(id.clone());
        self.modify(user_id, |record| {
            record.orders.insert(0, stored);
            Ok(())
        })
        .await?;
        Ok(id)
    }

    async fn update_order(&self, user_id: &str, order: &Order) -> Result<(), PersistenceError> {
        self.modify(user_id, |record| {
            let slot: &mut Order = record
                .orders
                .iter_mut()
                .find(|stored| order.is_persisted() && stored.id() == order.id())
                .ok_or_else(|| PersistenceError::NotFound(format!("order {}", order.id())))?;
            *slot = order.clone();
            Ok(())
        })
        .await
    }

    async fn get_bills(&self, user_id: &str) -> Result<Vec<BillRecord>, PersistenceError> {
        Ok(self.snapshot(user_id).await?.bills)
    }

    async fn create_bill(
        &self,
        user_id: &str,
        bill: &BillRecord,
    ) -> Result<String, PersistenceError> {
        let id: String = generate_id("bill");
        let stored: BillRecord = bill.clone().with_id(id.clone());
        self.modify(user_id, |record| {
            record.bills.insert(0, stored);
            Ok(())
        })
        .await?;
        Ok(id)
    }

    async fn update_bill(&self, user_id: &str, bill: &BillRecord) -> Result<(), PersistenceError> {
        self.modify(user_id, |record| {
            let slot: &mut BillRecord = record
                .bills
                .iter_mut()
                .find(|stored| !bill.id.is_empty() && stored.id == bill.id)
                .ok_or_else(|| PersistenceError::NotFound(format!("bill {}", bill.id)))?;
            *slot = bill.clone();
            Ok(())
        })
        .await
    }

    async fn get_activity(&self, user_id: &str) -> Result<Vec<PointsActivity>, PersistenceError> {
        Ok(self.snapshot(user_id).await?.points_activity)
    }

    async fn create_activity(
        &self,
        user_id: &str,
        entry: &LedgerEntry,
        date: OffsetDateTime,
    ) -> Result<PointsActivity, PersistenceError> {
        let activity: PointsActivity = entry.clone().into_activity(generate_id("activity"), date);
        let stored: PointsActivity = activity.clone();
        self.modify(user_id, |record| {
            record.points_activity.insert(0, stored);
            Ok(())
        })
        .await?;
        Ok(activity)
    }

    async fn clear_all(&self, user_id: &str) -> Result<(), PersistenceError> {
        self.modify(user_id, |record| {
            *record = DataRecord::default();
            Ok(())
        })
        .await
    }
}
