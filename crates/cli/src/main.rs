//! RocketShoes CLI - Shopping cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with line subtotals and total
//! rocketshoes cart show
//!
//! # Add one unit of product 3
//! rocketshoes cart add 3
//!
//! # Set product 3 to exactly 2 units
//! rocketshoes cart update 3 2
//!
//! # Remove product 3
//! rocketshoes cart remove 3
//! ```
//!
//! # Commands
//!
//! - `cart show` - Print the persisted cart
//! - `cart add` - Add one unit, checked against live stock
//! - `cart update` - Replace a line's amount, checked against live stock
//! - `cart remove` - Drop a line
//!
//! Configuration comes from `ROCKETSHOES_*` environment variables (see
//! `rocketshoes_storefront::config`); `--api-url` and `--storage-dir`
//! override them.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rocketshoes_core::ProductId;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "rocketshoes")]
#[command(author, version, about = "RocketShoes shopping cart")]
struct Cli {
    /// Catalog API base URL (overrides `ROCKETSHOES_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the persisted cart (overrides `ROCKETSHOES_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Set the amount of a product already in the cart
    Update {
        /// Product ID
        product_id: ProductId,

        /// New amount (replaces the current one)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// Filter used when `RUST_LOG` is unset. Notifications are printed directly,
/// so storefront info events stay quiet.
const DEFAULT_LOG_FILTER: &str = "rocketshoes_storefront=warn,rocketshoes_cli=info";

/// Initialize tracing on stderr; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let overrides = commands::Overrides {
        api_url: cli.api_url,
        storage_dir: cli.storage_dir,
    };

    let result = match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&overrides).await,
            CartAction::Add { product_id } => commands::cart::add(&overrides, product_id).await,
            CartAction::Remove { product_id } => {
                commands::cart::remove(&overrides, product_id).await
            }
            CartAction::Update { product_id, amount } => {
                commands::cart::update(&overrides, product_id, amount).await
            }
        },
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}
