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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use swadesi_domain::User;
use swadesi_engine::{EngineConfig, EngineDeps, Session};
use swadesi_persistence::{
    Credential, CredentialSlot, DEFAULT_NAMESPACE, Gateway, GatewayConfig,
};
use tracing::{info, warn};

/// Swadesi - order lifecycle and rewards engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "SWADESI_DATABASE", global = true)]
    database: Option<PathBuf>,

    /// Base URL of the remote backend. Runs local-only when absent.
    #[arg(long, env = "SWADESI_BACKEND_URL", global = true)]
    backend_url: Option<String>,

    /// Bearer token for the remote backend.
    #[arg(long, env = "SWADESI_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Namespace separating local data sets.
    #[arg(long, env = "SWADESI_NAMESPACE", default_value = DEFAULT_NAMESPACE, global = true)]
    namespace: String,

    /// Timeout for each remote request, in seconds.
    #[arg(long, default_value_t = 10, global = true)]
    request_timeout_secs: u64,

    /// User to act as.
    #[arg(long, default_value = "demo_user", global = true)]
    user_id: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show points, tier, and level.
    Standing,
    /// Price a cart without placing it.
    Quote(CheckoutArgs),
    /// Place an order.
    Place {
        #[command(flatten)]
        checkout: CheckoutArgs,
        /// Stay until the order is delivered.
        #[arg(long)]
        watch: bool,
    },
    /// List orders, newest first.
    Orders,
    /// List points activity, newest first.
    Ledger,
    /// Upload a shopping bill for points.
    Bill {
        #[arg(long)]
        vendor: String,
        /// Bill amount in rupees.
        #[arg(long)]
        amount: f64,
        /// Stay until the bill is verified.
        #[arg(long)]
        watch: bool,
    },
    /// Spend points on a reward.
    Redeem {
        #[arg(long)]
        reward: String,
        #[arg(long)]
        cost: u64,
    },
    /// Clear all stored data and reset standing.
    Clear,
}

#[derive(ClapArgs, Debug)]
struct CheckoutArgs {
    /// JSON file with cart lines (`[{"product": {...}, "quantity": 2}]`).
    /// Replaces the stored cart. Uses the stored cart when absent.
    #[arg(long)]
    cart: Option<PathBuf>,

    /// Points to redeem against the order.
    #[arg(long, default_value_t = 0)]
    redeem: u64,

    /// JSON file with the delivery address.
    #[arg(long)]
    address: Option<PathBuf>,
}

fn credential_for(args: &Args) -> Option<Credential> {
    match (&args.token, &args.backend_url) {
        (Some(token), _) => Some(Credential::new(token.clone())),
        (None, None) => Some(Credential::local()),
        (None, Some(_)) => None,
    }
}

async fn load_or_create_user(
    gateway: &Gateway,
    user_id: &str,
    starting_points: u64,
) -> Result<User, Box<dyn std::error::Error>> {
    if let Some(user) = gateway.get_user(user_id).await? {
        return Ok(user);
    }
    info!(user_id, "No stored profile, starting a new one");
    Ok(User::new(
        user_id,
        "Swadesi Shopper",
        format!("{user_id}@swadesi.local"),
        starting_points,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let gateway_config: GatewayConfig = GatewayConfig {
        backend_url: args.backend_url.clone(),
        request_timeout: Duration::from_secs(args.request_timeout_secs),
        database_path: args.database.clone(),
        namespace: args.namespace.clone(),
    };
    let credential: Option<Credential> = credential_for(&args);
    match &credential {
        None => warn!("No token given for the remote backend; remote calls will be refused"),
        Some(c) if c.is_local() && args.backend_url.is_some() => {
            warn!("A device-local token was given for the remote backend");
        }
        Some(_) => {}
    }
    let slot: CredentialSlot = CredentialSlot::new(credential);
    let gateway: Arc<Gateway> = Arc::new(Gateway::from_config(&gateway_config, slot)?);

    let config: EngineConfig = EngineConfig::default();
    let user: User =
        load_or_create_user(&gateway, &args.user_id, config.rewards.reset_points).await?;
    let session: Session = Session::open(EngineDeps::new(gateway, config.clone()), user).await?;

    let outcome = commands::run(&session, &config, args.command).await;
    session.close().await;

    let output: serde_json::Value = outcome?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_place_with_globals_after_subcommand() {
        let args: Args = Args::try_parse_from([
            "swadesi",
            "place",
            "--redeem",
            "50",
            "--watch",
            "--user-id",
            "asha",
        ])
        .unwrap();
        assert_eq!(args.user_id, "asha");
        assert_eq!(args.namespace, DEFAULT_NAMESPACE);
        match args.command {
            Command::Place { checkout, watch } => {
                assert_eq!(checkout.redeem, 50);
                assert!(checkout.cart.is_none());
                assert!(watch);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_local_mode_mints_a_demo_credential() {
        let args: Args = Args::try_parse_from(["swadesi", "standing"]).unwrap();
        let credential: Credential = credential_for(&args).unwrap();
        assert!(credential.is_local());
    }

    #[test]
    fn test_remote_mode_without_token_has_no_credential() {
        let args: Args =
            Args::try_parse_from(["swadesi", "--backend-url", "http://127.0.0.1:9", "orders"])
                .unwrap();
        assert!(credential_for(&args).is_none());
    }
}
