// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use swadesi_domain::{BillRecord, Cart, DeliveryPerson, Money, Order, Product, User};
use swadesi_ledger::{LedgerEntry, PointsActivity};
use swadesi_persistence::{
    Credential, CredentialSlot, CredentialStatus, Gateway, LocalStore, PersistenceError, Store,
    StoreMode,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{Clock, Dispatch, EngineConfig, EngineDeps, RecordingNotifier, Session};

pub const TEST_USER: &str = "user-1";

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-14 10:00 UTC)
}

pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

pub struct FixedDispatch;

impl Dispatch for FixedDispatch {
    fn assign(&self) -> DeliveryPerson {
        create_test_courier()
    }
}

pub fn create_test_courier() -> DeliveryPerson {
    DeliveryPerson {
        name: String::from("Meera Sharma"),
        phone: String::from("+91 9876543210"),
        photo: String::from("courier.jpg"),
    }
}

pub fn create_test_user(points: u64) -> User {
    User::new(TEST_USER, "Asha Rao", "asha@example.com", points)
}

pub fn create_test_product(id: &str, rupees: u64, made_in_india: bool) -> Product {
    Product::new(
        id,
        format!("Product {id}"),
        Money::from_rupees(rupees),
        "Channapatna Toys",
        made_in_india,
    )
}

pub fn create_test_gateway() -> Arc<Gateway> {
    let local: LocalStore = LocalStore::new_in_memory("engine_tests").unwrap();
    let slot: CredentialSlot = CredentialSlot::new(Some(Credential::local()));
    Arc::new(Gateway::local_only(local, slot))
}

/// A local store that can be told to stall or fail specific writes.
pub struct ScriptedStore {
    inner: LocalStore,
    order_update_delay: Option<Duration>,
    fail_activity: bool,
    reject_user_updates: bool,
}

impl ScriptedStore {
    pub fn local() -> Self {
        Self {
            inner: LocalStore::new_in_memory("engine_scripted").unwrap(),
            order_update_delay: None,
            fail_activity: false,
            reject_user_updates: false,
        }
    }

    /// Applies order updates, then stalls before reporting success.
    pub const fn with_order_update_delay(mut self, delay: Duration) -> Self {
        self.order_update_delay = Some(delay);
        self
    }

    pub const fn failing_activity(mut self) -> Self {
        self.fail_activity = true;
        self
    }

    /// Answers every profile write as if the credential had expired.
    pub const fn rejecting_user_updates(mut self) -> Self {
        self.reject_user_updates = true;
        self
    }

    pub fn into_gateway(self) -> Arc<Gateway> {
        let slot: CredentialSlot = CredentialSlot::new(Some(Credential::local()));
        Arc::new(Gateway::new(None, Box::new(self), slot))
    }
}

#[async_trait]
impl Store for ScriptedStore {
    fn mode(&self) -> StoreMode {
        self.inner.mode()
    }

    async fn probe_credential(
        &self,
        credential: &Credential,
    ) -> Result<CredentialStatus, PersistenceError> {
        self.inner.probe_credential(credential).await
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, PersistenceError> {
        self.inner.get_user(user_id).await
    }

    async fn update_user(&self, user: &User) -> Result<(), PersistenceError> {
        if self.reject_user_updates {
            return Err(PersistenceError::Unauthorized);
        }
        self.inner.update_user(user).await
    }

    async fn get_cart(&self, user_id: &str) -> Result<Cart, PersistenceError> {
        self.inner.get_cart(user_id).await
    }

    async fn save_cart(&self, user_id: &str, cart: &Cart) -> Result<(), PersistenceError> {
        self.inner.save_cart(user_id, cart).await
    }

    async fn clear_cart(&self, user_id: &str) -> Result<(), PersistenceError> {
        self.inner.clear_cart(user_id).await
    }

    async fn get_orders(&self, user_id: &str) -> Result<Vec<Order>, PersistenceError> {
        self.inner.get_orders(user_id).await
    }

    async fn create_order(&self, user_id: &str, order: &Order) -> Result<String, PersistenceError> {
        self.inner.create_order(user_id, order).await
    }

    async fn update_order(&self, user_id: &str, order: &Order) -> Result<(), PersistenceError> {
        self.inner.update_order(user_id, order).await?;
        if let Some(delay) = self.order_update_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    async fn get_bills(&self, user_id: &str) -> Result<Vec<BillRecord>, PersistenceError> {
        self.inner.get_bills(user_id).await
    }

    async fn create_bill(
        &self,
        user_id: &str,
        bill: &BillRecord,
    ) -> Result<String, PersistenceError> {
        self.inner.create_bill(user_id, bill).await
    }

    async fn update_bill(&self, user_id: &str, bill: &BillRecord) -> Result<(), PersistenceError> {
        self.inner.update_bill(user_id, bill).await
    }

    async fn get_activity(&self, user_id: &str) -> Result<Vec<PointsActivity>, PersistenceError> {
        self.inner.get_activity(user_id).await
    }

    async fn create_activity(
        &self,
        user_id: &str,
        entry: &LedgerEntry,
        date: OffsetDateTime,
    ) -> Result<PointsActivity, PersistenceError> {
        if self.fail_activity {
            return Err(PersistenceError::Database(String::from(
                "points activity table unavailable",
            )));
        }
        self.inner.create_activity(user_id, entry, date).await
    }

    async fn clear_all(&self, user_id: &str) -> Result<(), PersistenceError> {
        self.inner.clear_all(user_id).await
    }
}

/// Config with no automatic advancement, for tests that drive orders by hand.
pub fn create_manual_config() -> EngineConfig {
    EngineConfig {
        advancement_offsets: Vec::new(),
        ..EngineConfig::default()
    }
}

pub struct TestSession {
    pub session: Session,
    pub gateway: Arc<Gateway>,
    pub notifier: Arc<RecordingNotifier>,
}

pub async fn open_test_session_with(config: EngineConfig, points: u64) -> TestSession {
    open_test_session_over(create_test_gateway(), config, points).await
}

pub async fn open_test_session_over(
    gateway: Arc<Gateway>,
    config: EngineConfig,
    points: u64,
) -> TestSession {
    let notifier: Arc<RecordingNotifier> = Arc::new(RecordingNotifier::default());
    let deps: EngineDeps = EngineDeps::new(Arc::clone(&gateway), config)
        .with_clock(Arc::new(FixedClock(test_now())))
        .with_dispatch(Arc::new(FixedDispatch))
        .with_notifier(notifier.clone());
    let session: Session = Session::open(deps, create_test_user(points)).await.unwrap();
    TestSession {
        session,
        gateway,
        notifier,
    }
}

pub async fn open_test_session(points: u64) -> TestSession {
    open_test_session_with(create_manual_config(), points).await
}
