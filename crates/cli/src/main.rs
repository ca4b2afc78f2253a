//! Shopfront CLI - browse the catalog and manage a cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! shop catalog list --search head --sort price-asc
//! shop catalog show p1
//!
//! # Cart and wishlist
//! shop cart add p1 --quantity 2
//! shop wishlist toggle p3
//! shop wishlist move-to-cart p3
//!
//! # Preferences
//! shop prefs theme dark
//! shop prefs show --platform dark
//!
//! # Account and checkout
//! shop auth login -e ada@example.com -p secret
//! shop checkout --full-name "Ada Lovelace" --address "12 Main St" \
//!     --city London --postal-code N1 --phone 5550100
//! ```
//!
//! State is persisted under `SHOPFRONT_DATA_DIR` between runs; see
//! `shopfront_storefront::config` for every variable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopfront_storefront::config::{ShopfrontConfig, StorageKind};
use shopfront_storefront::error::{AppError, Result};
use shopfront_storefront::seed;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::{FileStorage, KeyValueStore, MemoryStorage};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "Shopfront storefront client")]
struct Cli {
    /// Load products from this JSON file instead of the bundled catalog
    #[arg(long, global = true, value_name = "PATH")]
    products: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Manage saved products
    Wishlist {
        #[command(subcommand)]
        action: commands::wishlist::WishlistAction,
    },
    /// Theme, color scheme and language
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
    /// Sign in, register or sign out
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Place an order for everything in the cart
    Checkout(commands::checkout::CheckoutArgs),
    /// Delete all stored app data
    Reset,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ShopfrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = ShopfrontConfig::from_env();

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_storefront=info,shopfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => match config.storage {
            StorageKind::File => {
                let storage = FileStorage::new(&config.data_dir);
                run(cli, config, storage).await
            }
            StorageKind::Memory => run(cli, config, MemoryStorage::new()).await,
        },
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            output::error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run<S: KeyValueStore + Clone>(
    cli: Cli,
    config: ShopfrontConfig,
    storage: S,
) -> Result<()> {
    let products = match &cli.products {
        Some(path) => seed::load_products(path).await?,
        None => seed::bundled_products()?,
    };
    let mut state = AppState::bootstrap(config, storage, products).await;

    match cli.command {
        Commands::Catalog { action } => commands::catalog::run(&state, action),
        Commands::Cart { action } => commands::cart::run(&mut state, action).await,
        Commands::Wishlist { action } => commands::wishlist::run(&mut state, action).await,
        Commands::Prefs { action } => commands::prefs::run(&mut state, action).await,
        Commands::Auth { action } => commands::auth::run(&mut state, action).await,
        Commands::Checkout(args) => commands::checkout::run(&mut state, args).await,
        Commands::Reset => {
            state.reset_app_data().await;
            output::done("All app data cleared");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_nested_commands() {
        let cli = Cli::try_parse_from(["shop", "cart", "add", "p1", "--quantity", "3"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["shop", "catalog", "list", "--sort", "sideways"]);
        assert!(cli.is_err());
    }
}
