// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The signed-in session.
//!
//! A [`Session`] owns the in-memory state for one user from sign-in to
//! sign-out. Every operation takes the context lock for its whole
//! duration, so writes for the user are applied in call order. The
//! in-memory state changes first and persistence is written after it.
//!
//! ## Best-effort writes
//!
//! Creating an order or a bill must succeed for the operation to proceed,
//! because the store assigns the id. Every other write (user aggregate,
//! cart, order and bill updates, ledger entries) is best-effort: a failure
//! is logged and the in-memory state is kept. A ledger write that fails
//! after a balance change is not rolled back, so balance and ledger can
//! diverge.

use std::sync::{Arc, Weak};
use swadesi::{
    OrderQuote, advance_order, authorize_redemption, cancel_order, daily_login, prepare_bill,
    quote_order, redeem_for_order, redeem_reward, reset_standing, verify_bill,
};
use swadesi_domain::{
    Address, BillRecord, Cart, DeliveryPerson, Money, Order, OrderStatus, Product, User,
};
use swadesi_ledger::{LedgerEntry, PointsActivity};
use swadesi_persistence::{BatchLoad, CredentialStatus, Gateway, PersistenceError, StoreMode};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::ledger::{RewardsLedger, sort_newest_first};
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::providers::{Clock, Dispatch, RosterDispatch, SystemClock};
use crate::scheduler::{Scheduler, TaskKey};

/// Collaborators and settings for opening a session.
#[derive(Clone)]
pub struct EngineDeps {
    pub gateway: Arc<Gateway>,
    pub clock: Arc<dyn Clock>,
    pub dispatch: Arc<dyn Dispatch>,
    pub notifier: Arc<dyn Notifier>,
    pub config: EngineConfig,
}

impl EngineDeps {
    /// Uses the system clock, the built-in courier roster, and log output.
    #[must_use]
    pub fn new(gateway: Arc<Gateway>, config: EngineConfig) -> Self {
        Self {
            gateway,
            clock: Arc::new(SystemClock),
            dispatch: Arc::new(RosterDispatch::default()),
            notifier: Arc::new(TracingNotifier),
            config,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Arc<dyn Dispatch>) -> Self {
        self.dispatch = dispatch;
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

/// The user's live state.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SessionContext {
    user: User,
    cart: Cart,
    orders: Vec<Order>,
    bills: Vec<BillRecord>,
    activity: Vec<PointsActivity>,
}

impl SessionContext {
    fn order_index(&self, order_id: &str) -> Result<usize, EngineError> {
        self.orders
            .iter()
            .position(|o| o.id() == order_id)
            .ok_or_else(|| EngineError::OrderNotFound(order_id.to_string()))
    }

    fn bill_index(&self, bill_id: &str) -> Result<usize, EngineError> {
        self.bills
            .iter()
            .position(|b| b.id == bill_id)
            .ok_or_else(|| EngineError::BillNotFound(bill_id.to_string()))
    }
}

struct SessionInner {
    gateway: Arc<Gateway>,
    ledger: RewardsLedger,
    clock: Arc<dyn Clock>,
    dispatch: Arc<dyn Dispatch>,
    notifier: Arc<dyn Notifier>,
    config: EngineConfig,
    scheduler: Scheduler,
    context: Mutex<Option<SessionContext>>,
}

/// A signed-in user's session.
///
/// Cloning shares the session. Background tasks hold only a weak
/// reference, so dropping every clone stops them.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("mode", &self.mode())
            .field("pending_tasks", &self.pending_tasks())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Opens a session for `user`.
    ///
    /// The profile is normalised, the user's data is loaded through the
    /// gateway, and the daily-login challenge is awarded if eligible.
    ///
    /// # Errors
    ///
    /// Returns a ledger-construction error only if the daily-login
    /// challenge is configured with zero points.
    pub async fn open(deps: EngineDeps, mut user: User) -> Result<Self, EngineError> {
        let EngineDeps {
            gateway,
            clock,
            dispatch,
            notifier,
            config,
        } = deps;
        let ledger: RewardsLedger = RewardsLedger::new(Arc::clone(&gateway), Arc::clone(&clock));
        let inner: Arc<SessionInner> = Arc::new(SessionInner {
            gateway,
            ledger,
            clock,
            dispatch,
            notifier,
            config,
            scheduler: Scheduler::new(),
            context: Mutex::new(None),
        });

        user.normalize(inner.config.rewards.default_lifetime_points);
        let load: BatchLoad = inner.gateway.load_user_data(user.id()).await;
        if load.status != CredentialStatus::Valid {
            warn!(user_id = user.id(), status = ?load.status, "Opening session with empty state");
        }
        if inner.gateway.is_fallback() {
            inner.notify(Notification::info(
                "Working offline. Changes are saved on this device.",
            ));
        }

        let mut activity: Vec<PointsActivity> = load.data.activity;
        sort_newest_first(&mut activity);
        let mut context: SessionContext = SessionContext {
            user,
            cart: load.data.cart,
            orders: load.data.orders,
            bills: load.data.bills,
            activity,
        };

        let now: OffsetDateTime = inner.clock.now();
        if let Some(transition) = daily_login(&context.user, now, &inner.config.rewards)? {
            context.user = transition.user;
            if let Some(entry) = transition.entry {
                inner.record_entry(&mut context, &entry).await;
            }
            inner.notify(Notification::success(format!(
                "Daily Challenge Complete: +{} points!",
                transition.points
            )));
        }
        if context.user.last_login_date().is_none() {
            context.user = context.user.clone().with_last_login_date(now);
        }
        inner.persist_user(&context.user).await;

        info!(
            user_id = context.user.id(),
            mode = %inner.gateway.mode(),
            orders = context.orders.len(),
            points = context.user.points(),
            "Session opened"
        );
        *inner.context.lock().await = Some(context);
        Ok(Self { inner })
    }

    /// The persistence mode currently in use.
    #[must_use]
    pub fn mode(&self) -> StoreMode {
        self.inner.gateway.mode()
    }

    #[must_use]
    pub fn ledger(&self) -> &RewardsLedger {
        &self.inner.ledger
    }

    /// Number of scheduled background tasks still running.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.inner.scheduler.pending()
    }

    /// # Errors
    ///
    /// Returns `EngineError::SessionClosed` after [`Session::close`].
    pub async fn user(&self) -> Result<User, EngineError> {
        self.inner.read(|ctx| ctx.user.clone()).await
    }

    /// # Errors
    ///
    /// Returns `EngineError::SessionClosed` after [`Session::close`].
    pub async fn cart(&self) -> Result<Cart, EngineError> {
        self.inner.read(|ctx| ctx.cart.clone()).await
    }

    /// Orders, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::SessionClosed` after [`Session::close`].
    pub async fn orders(&self) -> Result<Vec<Order>, EngineError> {
        self.inner.read(|ctx| ctx.orders.clone()).await
    }

    /// # Errors
    ///
    /// Returns `EngineError::OrderNotFound` if no order has that id.
    pub async fn order(&self, order_id: &str) -> Result<Order, EngineError> {
        let guard = self.inner.context.lock().await;
        let ctx: &SessionContext = guard.as_ref().ok_or(EngineError::SessionClosed)?;
        let index: usize = ctx.order_index(order_id)?;
        Ok(ctx.orders[index].clone())
    }

    /// # Errors
    ///
    /// Returns `EngineError::SessionClosed` after [`Session::close`].
    pub async fn bills(&self) -> Result<Vec<BillRecord>, EngineError> {
        self.inner.read(|ctx| ctx.bills.clone()).await
    }

    /// Ledger entries recorded or loaded in this session, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::SessionClosed` after [`Session::close`].
    pub async fn activity(&self) -> Result<Vec<PointsActivity>, EngineError> {
        self.inner.read(|ctx| ctx.activity.clone()).await
    }

    /// Adds `quantity` of `product`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` for a zero quantity.
    pub async fn add_to_cart(&self, product: Product, quantity: u32) -> Result<Cart, EngineError> {
        self.inner
            .edit_cart(|cart| cart.add(product, quantity).map_err(EngineError::from))
            .await
    }

    /// Sets the quantity of a line. Zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` if the quantity is too large.
    pub async fn set_cart_quantity(
        &self,
        product_id: &str,
        quantity: i64,
    ) -> Result<Cart, EngineError> {
        self.inner
            .edit_cart(|cart| {
                cart.set_quantity(product_id, quantity)?;
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// Returns `EngineError::SessionClosed` after [`Session::close`].
    pub async fn remove_from_cart(&self, product_id: &str) -> Result<Cart, EngineError> {
        self.inner
            .edit_cart(|cart| {
                cart.remove(product_id);
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// Returns `EngineError::SessionClosed` after [`Session::close`].
    pub async fn clear_cart(&self) -> Result<Cart, EngineError> {
        self.inner
            .edit_cart(|cart| {
                cart.clear();
                Ok(())
            })
            .await
    }

    /// Prices the current cart without placing an order.
    ///
    /// # Errors
    ///
    /// Returns the same validation errors as [`Session::place_order`].
    pub async fn quote(
        &self,
        points_used: u64,
        address: Option<&Address>,
    ) -> Result<OrderQuote, EngineError> {
        let guard = self.inner.context.lock().await;
        let ctx: &SessionContext = guard.as_ref().ok_or(EngineError::SessionClosed)?;
        authorize_redemption(&ctx.user, points_used)?;
        let placement = quote_order(
            &ctx.cart,
            Some(&ctx.user),
            points_used,
            address,
            self.inner.clock.now(),
            &self.inner.config.pricing,
        )?;
        Ok(placement.quote)
    }

    /// Checks out the cart.
    ///
    /// The order is persisted, the cart cleared, redeemed points debited,
    /// and automatic advancement scheduled.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any change if the cart is empty or
    /// the redemption exceeds the balance, or the gateway error if the order
    /// cannot be stored.
    pub async fn place_order(
        &self,
        points_used: u64,
        address: Option<&Address>,
    ) -> Result<Order, EngineError> {
        let order: Order = self.inner.place_order(points_used, address).await?;
        self.inner.schedule_advancement(order.id().to_string());
        Ok(order)
    }

    /// Moves an order to `status` now.
    ///
    /// Scheduled advancement calls this. It is public so that externally
    /// driven status events can use the same path.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::OrderNotFound` or an invalid-transition error.
    pub async fn apply_advancement(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, EngineError> {
        self.inner.apply_advancement(order_id, status).await
    }

    /// Cancels a non-terminal order and its scheduled advancement.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::OrderNotFound` or an invalid-transition error
    /// for a delivered or cancelled order.
    pub async fn cancel_order(&self, order_id: &str) -> Result<Order, EngineError> {
        self.inner.cancel_order(order_id).await
    }

    /// Stores an unverified bill and schedules its verification.
    ///
    /// # Errors
    ///
    /// Returns the gateway error if the bill cannot be stored.
    pub async fn upload_bill(
        &self,
        vendor_name: &str,
        amount: Money,
    ) -> Result<BillRecord, EngineError> {
        let bill: BillRecord = self.inner.upload_bill(vendor_name, amount).await?;
        self.inner.schedule_verification(bill.id.clone());
        Ok(bill)
    }

    /// Verifies a bill now. `Ok(None)` if it was already verified.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::BillNotFound` if no bill has that id.
    pub async fn verify_bill(&self, bill_id: &str) -> Result<Option<BillRecord>, EngineError> {
        self.inner.verify_bill(bill_id).await
    }

    /// Spends `cost` points on a reward and returns the updated user.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientPoints` if the balance is too low.
    pub async fn redeem_reward(&self, reward_id: &str, cost: u64) -> Result<User, EngineError> {
        self.inner.redeem_reward(reward_id, cost).await
    }

    /// Clears the user's stored data and resets their standing.
    ///
    /// # Errors
    ///
    /// Returns the gateway error if the stored data could not be cleared.
    /// The in-memory state is left unchanged in that case.
    pub async fn clear_all_data(&self) -> Result<User, EngineError> {
        self.inner.clear_all_data().await
    }

    /// Ends the session. Scheduled tasks are cancelled and later calls fail
    /// with `EngineError::SessionClosed`.
    pub async fn close(&self) {
        // A task holding the lock is mid-update and must finish first.
        let mut guard = self.inner.context.lock().await;
        let cancelled: usize = self.inner.scheduler.cancel_all();
        let previous: Option<SessionContext> = guard.take();
        drop(guard);
        if let Some(ctx) = previous {
            info!(user_id = ctx.user.id(), cancelled, "Session closed");
        }
    }
}

impl SessionInner {
    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    async fn read<T>(&self, view: impl FnOnce(&SessionContext) -> T) -> Result<T, EngineError> {
        let guard = self.context.lock().await;
        guard.as_ref().map(view).ok_or(EngineError::SessionClosed)
    }

    /// An expired credential needs the user to sign in again, so it is
    /// reported even when the write itself is best-effort.
    fn surface_auth_failure(&self, err: &PersistenceError) {
        if matches!(err, PersistenceError::Unauthorized) {
            self.notify(Notification::error(err.to_string()));
        }
    }

    async fn persist_user(&self, user: &User) {
        if let Err(err) = self.gateway.update_user(user).await {
            error!(user_id = user.id(), error = %err, "Failed to persist user");
            self.surface_auth_failure(&err);
        }
    }

    async fn persist_order(&self, user_id: &str, order: &Order) {
        if let Err(err) = self.gateway.update_order(user_id, order).await {
            error!(order_id = order.id(), error = %err, "Failed to persist order update");
            self.surface_auth_failure(&err);
        }
    }

    async fn persist_bill(&self, user_id: &str, bill: &BillRecord) {
        if let Err(err) = self.gateway.update_bill(user_id, bill).await {
            error!(bill_id = %bill.id, error = %err, "Failed to persist bill update");
            self.surface_auth_failure(&err);
        }
    }

    /// Writes a ledger entry and keeps the stored record in memory.
    async fn record_entry(&self, ctx: &mut SessionContext, entry: &LedgerEntry) {
        match self.ledger.record(ctx.user.id(), entry).await {
            Ok(activity) => ctx.activity.insert(0, activity),
            Err(err) => {
                error!(
                    user_id = ctx.user.id(),
                    source = entry.source().as_str(),
                    amount = entry.amount(),
                    error = %err,
                    "Failed to record ledger entry"
                );
                if let EngineError::Persistence(cause) = &err {
                    self.surface_auth_failure(cause);
                }
            }
        }
    }

    async fn edit_cart(
        &self,
        edit: impl FnOnce(&mut Cart) -> Result<(), EngineError>,
    ) -> Result<Cart, EngineError> {
        let mut guard = self.context.lock().await;
        let ctx: &mut SessionContext = guard.as_mut().ok_or(EngineError::SessionClosed)?;
        let mut cart: Cart = ctx.cart.clone();
        edit(&mut cart)?;
        ctx.cart = cart;
        if let Err(err) = self.gateway.save_cart(ctx.user.id(), &ctx.cart).await {
            error!(user_id = ctx.user.id(), error = %err, "Failed to persist cart");
            self.surface_auth_failure(&err);
        }
        Ok(ctx.cart.clone())
    }

    async fn place_order(
        &self,
        points_used: u64,
        address: Option<&Address>,
    ) -> Result<Order, EngineError> {
        let mut guard = self.context.lock().await;
        let ctx: &mut SessionContext = guard.as_mut().ok_or(EngineError::SessionClosed)?;

        authorize_redemption(&ctx.user, points_used)?;
        let placement = quote_order(
            &ctx.cart,
            Some(&ctx.user),
            points_used,
            address,
            self.clock.now(),
            &self.config.pricing,
        )?;

        let stored = self
            .gateway
            .create_order(ctx.user.id(), &placement.order)
            .await;
        let order_id: String = match stored {
            Ok(id) => id,
            Err(err) => {
                error!(user_id = ctx.user.id(), error = %err, "Failed to store order");
                self.notify(Notification::error("Failed to place order. Please try again."));
                return Err(err.into());
            }
        };
        let order: Order = placement.order.with_id(order_id);
        ctx.orders.insert(0, order.clone());

        ctx.cart.clear();
        if let Err(err) = self.gateway.clear_cart(ctx.user.id()).await {
            error!(user_id = ctx.user.id(), error = %err, "Failed to clear stored cart");
            self.surface_auth_failure(&err);
        }

        let redemption = redeem_for_order(&ctx.user, &order)?;
        ctx.user = redemption.user;
        ctx.user.record_spend(order.total());
        if let Some(entry) = redemption.entry {
            self.record_entry(ctx, &entry).await;
        }
        self.persist_user(&ctx.user).await;

        info!(
            order_id = order.id(),
            total = %order.total(),
            points_earned = order.points_earned(),
            points_used = order.points_used(),
            "Order placed"
        );
        self.notify(Notification::success("Order placed successfully!"));
        Ok(order)
    }

    fn schedule_advancement(self: &Arc<Self>, order_id: String) {
        let session: Weak<Self> = Arc::downgrade(self);
        let steps: Vec<(OrderStatus, std::time::Duration)> =
            self.config.advancement_offsets.clone();
        let placed: tokio::time::Instant = tokio::time::Instant::now();
        let key: TaskKey = TaskKey::OrderAdvance(order_id.clone());

        self.scheduler.schedule(key, async move {
            for (status, offset) in steps {
                tokio::time::sleep_until(placed + offset).await;
                let Some(inner) = session.upgrade() else {
                    return;
                };
                match inner.apply_advancement(&order_id, status).await {
                    Ok(_) => {}
                    Err(EngineError::SessionClosed) => return,
                    Err(err) => {
                        warn!(order_id = %order_id, %status, error = %err, "Scheduled advancement stopped");
                        return;
                    }
                }
            }
        });
    }

    async fn apply_advancement(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, EngineError> {
        let mut guard = self.context.lock().await;
        let ctx: &mut SessionContext = guard.as_mut().ok_or(EngineError::SessionClosed)?;
        let index: usize = ctx.order_index(order_id)?;

        let courier: Option<DeliveryPerson> =
            (status == OrderStatus::OutForDelivery).then(|| self.dispatch.assign());
        let result = advance_order(
            &ctx.orders[index],
            Some(&ctx.user),
            status,
            self.clock.now(),
            courier,
        )?;
        ctx.orders[index] = result.order.clone();
        self.persist_order(ctx.user.id(), &result.order).await;
        debug!(order_id, %status, "Order advanced");

        match result.award {
            Some(award) if award.points > 0 => {
                ctx.user = award.user;
                if let Some(entry) = award.entry {
                    self.record_entry(ctx, &entry).await;
                }
                self.persist_user(&ctx.user).await;
                info!(order_id, bonus = award.points, "Delivery bonus awarded");
                self.notify(Notification::success(format!(
                    "Order delivered! You earned {} points!",
                    award.points
                )));
            }
            _ => self.notify(Notification::info(format!("Order {}", status.label()))),
        }
        Ok(result.order)
    }

    async fn cancel_order(&self, order_id: &str) -> Result<Order, EngineError> {
        let mut guard = self.context.lock().await;
        let ctx: &mut SessionContext = guard.as_mut().ok_or(EngineError::SessionClosed)?;
        let index: usize = ctx.order_index(order_id)?;

        let order: Order = cancel_order(&ctx.orders[index], self.clock.now())?;
        self.scheduler
            .cancel(&TaskKey::OrderAdvance(order_id.to_string()));
        ctx.orders[index] = order.clone();
        self.persist_order(ctx.user.id(), &order).await;

        info!(order_id, "Order cancelled");
        self.notify(Notification::info(format!(
            "Order {}",
            OrderStatus::Cancelled.label()
        )));
        Ok(order)
    }

    async fn upload_bill(&self, vendor_name: &str, amount: Money) -> Result<BillRecord, EngineError> {
        let mut guard = self.context.lock().await;
        let ctx: &mut SessionContext = guard.as_mut().ok_or(EngineError::SessionClosed)?;

        let bill: BillRecord = prepare_bill(
            &ctx.user,
            vendor_name,
            amount,
            self.clock.now(),
            &self.config.pricing,
        );
        let bill_id: String = match self.gateway.create_bill(ctx.user.id(), &bill).await {
            Ok(id) => id,
            Err(err) => {
                error!(user_id = ctx.user.id(), error = %err, "Failed to store bill");
                self.notify(Notification::error("Failed to upload bill. Please try again."));
                return Err(err.into());
            }
        };
        let bill: BillRecord = bill.with_id(bill_id);
        ctx.bills.insert(0, bill.clone());

        info!(bill_id = %bill.id, points = bill.points_earned, "Bill uploaded");
        self.notify(Notification::info("Bill uploaded! Verification in progress..."));
        Ok(bill)
    }

    fn schedule_verification(self: &Arc<Self>, bill_id: String) {
        let session: Weak<Self> = Arc::downgrade(self);
        let delay: std::time::Duration = self.config.bill_verification_delay;
        let key: TaskKey = TaskKey::BillVerification(bill_id.clone());

        self.scheduler.schedule(key, async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = session.upgrade() else {
                return;
            };
            match inner.verify_bill(&bill_id).await {
                Ok(_) | Err(EngineError::SessionClosed) => {}
                Err(err) => warn!(bill_id = %bill_id, error = %err, "Scheduled verification failed"),
            }
        });
    }

    async fn verify_bill(&self, bill_id: &str) -> Result<Option<BillRecord>, EngineError> {
        let mut guard = self.context.lock().await;
        let ctx: &mut SessionContext = guard.as_mut().ok_or(EngineError::SessionClosed)?;
        let index: usize = ctx.bill_index(bill_id)?;

        let Some(verification) = verify_bill(&ctx.user, &ctx.bills[index])? else {
            debug!(bill_id, "Bill already verified");
            return Ok(None);
        };
        ctx.bills[index] = verification.bill.clone();
        self.persist_bill(ctx.user.id(), &verification.bill).await;

        let award = verification.award;
        ctx.user = award.user;
        if let Some(entry) = award.entry {
            self.record_entry(ctx, &entry).await;
        }
        self.persist_user(&ctx.user).await;

        info!(bill_id, points = award.points, "Bill verified");
        self.notify(Notification::success(format!(
            "Bill verified! You earned {} points!",
            award.points
        )));
        Ok(Some(verification.bill))
    }

    async fn redeem_reward(&self, reward_id: &str, cost: u64) -> Result<User, EngineError> {
        let mut guard = self.context.lock().await;
        let ctx: &mut SessionContext = guard.as_mut().ok_or(EngineError::SessionClosed)?;

        let transition = match redeem_reward(&ctx.user, reward_id, cost) {
            Ok(transition) => transition,
            Err(err) => {
                self.notify(Notification::error(
                    "Insufficient points to redeem this reward.",
                ));
                return Err(err.into());
            }
        };
        ctx.user = transition.user;
        if let Some(entry) = transition.entry {
            self.record_entry(ctx, &entry).await;
        }
        self.persist_user(&ctx.user).await;

        info!(reward_id, cost, "Reward redeemed");
        self.notify(Notification::success(format!(
            "Reward redeemed successfully! -{cost} points"
        )));
        Ok(ctx.user.clone())
    }

    async fn clear_all_data(&self) -> Result<User, EngineError> {
        let mut guard = self.context.lock().await;
        let ctx: &mut SessionContext = guard.as_mut().ok_or(EngineError::SessionClosed)?;

        if let Err(err) = self.gateway.clear_all(ctx.user.id()).await {
            error!(user_id = ctx.user.id(), error = %err, "Failed to clear user data");
            self.notify(Notification::error("Failed to clear data. Please try again."));
            return Err(err.into());
        }
        let cancelled: usize = self.scheduler.cancel_all();

        ctx.cart.clear();
        ctx.orders.clear();
        ctx.bills.clear();
        ctx.activity.clear();
        ctx.user = reset_standing(&ctx.user, &self.config.rewards);
        self.persist_user(&ctx.user).await;

        info!(user_id = ctx.user.id(), cancelled, "User data cleared");
        self.notify(Notification::success("All user data cleared successfully!"));
        Ok(ctx.user.clone())
    }
}
