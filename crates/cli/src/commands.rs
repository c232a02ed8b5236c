// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommand handlers. Each returns the JSON value printed on stdout.

use crate::{CheckoutArgs, Command};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::path::Path;
use std::time::Duration;
use swadesi::OrderQuote;
use swadesi_domain::{Address, BillRecord, Cart, Money, Order, OrderStatus, User};
use swadesi_engine::{EngineConfig, Session};
use swadesi_ledger::{LedgerTotals, PointsActivity};
use tracing::{info, warn};

type CommandResult = Result<Value, Box<dyn std::error::Error>>;

const WATCH_POLL: Duration = Duration::from_secs(1);
const WATCH_GRACE: Duration = Duration::from_secs(5);

pub async fn run(session: &Session, config: &EngineConfig, command: Command) -> CommandResult {
    match command {
        Command::Standing => Ok(standing_json(&session.user().await?)),
        Command::Quote(checkout) => quote(session, &checkout).await,
        Command::Place { checkout, watch } => place(session, config, &checkout, watch).await,
        Command::Orders => Ok(serde_json::to_value(session.orders().await?)?),
        Command::Ledger => ledger(session).await,
        Command::Bill {
            vendor,
            amount,
            watch,
        } => bill(session, config, &vendor, amount, watch).await,
        Command::Redeem { reward, cost } => {
            let user: User = session.redeem_reward(&reward, cost).await?;
            Ok(standing_json(&user))
        }
        Command::Clear => {
            let user: User = session.clear_all_data().await?;
            Ok(standing_json(&user))
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let raw: String = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn standing_json(user: &User) -> Value {
    json!({
        "userId": user.id(),
        "points": user.points(),
        "pointsLifetime": user.points_lifetime(),
        "tier": user.points_tier(),
        "level": user.level(),
        "billUploadCount": user.bill_upload_count(),
        "totalSpent": user.total_spent(),
    })
}

fn quote_json(quote: &OrderQuote, cart: &Cart) -> Value {
    json!({
        "units": cart.unit_count(),
        "subtotal": quote.subtotal,
        "madeInIndiaTotal": quote.made_in_india_total,
        "deliveryFee": quote.delivery_fee,
        "pointsUsed": quote.points_used,
        "finalTotal": quote.final_total,
        "basePoints": quote.base_points,
        "bonusPoints": quote.bonus_points,
        "pointsEarned": quote.points_earned,
    })
}

/// Loads the checkout inputs, replacing the stored cart if a file is given.
async fn prepare_checkout(
    session: &Session,
    checkout: &CheckoutArgs,
) -> Result<Option<Address>, Box<dyn std::error::Error>> {
    if let Some(path) = &checkout.cart {
        let cart: Cart = read_json(path)?;
        session.clear_cart().await?;
        for item in cart.into_items() {
            let quantity: u32 = item.quantity();
            session.add_to_cart(item.product, quantity).await?;
        }
    }
    checkout
        .address
        .as_deref()
        .map(read_json::<Address>)
        .transpose()
}

async fn quote(session: &Session, checkout: &CheckoutArgs) -> CommandResult {
    let address: Option<Address> = prepare_checkout(session, checkout).await?;
    let quote: OrderQuote = session.quote(checkout.redeem, address.as_ref()).await?;
    Ok(quote_json(&quote, &session.cart().await?))
}

async fn ledger(session: &Session) -> CommandResult {
    let activity: Vec<PointsActivity> = session.activity().await?;
    let totals: LedgerTotals = LedgerTotals::from_activities(&activity);
    Ok(json!({
        "earned": totals.earned,
        "redeemed": totals.redeemed,
        "net": totals.net(),
        "activity": activity,
    }))
}

async fn place(
    session: &Session,
    config: &EngineConfig,
    checkout: &CheckoutArgs,
    watch: bool,
) -> CommandResult {
    let address: Option<Address> = prepare_checkout(session, checkout).await?;
    let mut order: Order = session.place_order(checkout.redeem, address.as_ref()).await?;
    info!(order_id = %order.id(), total = %order.total(), "Order placed");

    if watch {
        let last_offset: Duration = config
            .advancement_offsets
            .iter()
            .map(|(_, offset)| *offset)
            .max()
            .unwrap_or_default();
        let deadline: tokio::time::Instant = tokio::time::Instant::now() + last_offset + WATCH_GRACE;
        let mut status: OrderStatus = order.status();
        while !order.status().is_terminal() && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(WATCH_POLL).await;
            order = session.order(order.id()).await?;
            if order.status() != status {
                status = order.status();
                info!(order_id = %order.id(), %status, "Order advanced");
            }
        }
        if !order.status().is_terminal() {
            warn!(order_id = %order.id(), %status, "Stopped watching before delivery");
        }
    }

    Ok(json!({
        "order": order,
        "standing": standing_json(&session.user().await?),
    }))
}

async fn bill(
    session: &Session,
    config: &EngineConfig,
    vendor: &str,
    amount: f64,
    watch: bool,
) -> CommandResult {
    let amount: Money = Money::from_rupees_f64(amount)?;
    let mut bill: BillRecord = session.upload_bill(vendor, amount).await?;

    if watch {
        tokio::time::sleep(config.bill_verification_delay + WATCH_POLL).await;
        if let Some(current) = session
            .bills()
            .await?
            .into_iter()
            .find(|b| b.id == bill.id)
        {
            bill = current;
        }
    }

    Ok(json!({
        "bill": bill,
        "standing": standing_json(&session.user().await?),
    }))
}
