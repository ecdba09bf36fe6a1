//! Unidemy CLI - a terminal storefront over the persisted shopper state.
//!
//! # Usage
//!
//! ```bash
//! # Browse the bundled catalog
//! unidemy catalog categories
//! unidemy catalog products --category furniture
//!
//! # Sign in and shop
//! unidemy login --id 1 --name "Maya Chen" --email maya@unidemy.test
//! unidemy wishlist add 3
//! unidemy cart add 6 -q 2
//! unidemy cart show
//!
//! # Inspect or wipe what is stored on disk
//! unidemy state show
//! unidemy state reset
//! ```
//!
//! # Configuration
//!
//! - `UNIDEMY_DATA_DIR` - directory holding the state file (default `.unidemy`)
//! - `UNIDEMY_STATE_KEY` - slot name (default `unidemy-state`)
//! - `UNIDEMY_REHYDRATE` - `replay` or `snapshot`
//! - `RUST_LOG` - log filter

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use unidemy_core::ProductId;
use unidemy_storefront::{FileStorage, Store, StoreConfig};

mod commands;

use commands::CommandError;
use commands::catalog::Catalog;

#[derive(Parser)]
#[command(name = "unidemy")]
#[command(author, version, about = "Unidemy campus marketplace CLI")]
struct Cli {
    /// Directory holding the persisted state (overrides `UNIDEMY_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login {
        /// Account ID
        #[arg(long)]
        id: i64,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Sign out and empty the wishlist and cart
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Manage saved listings
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the bundled catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect the persisted state
    State {
        #[command(subcommand)]
        action: StateAction,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Save a listing
    Add { id: ProductId },
    /// Unsave a listing
    Remove { id: ProductId },
    /// List saved listings
    List,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a listing to the cart
    Add {
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a cart line
    Remove { id: ProductId },
    /// Set the units on a cart line (0 removes it)
    Update { id: ProductId, quantity: u32 },
    /// Move a listing from the wishlist into the cart
    Move {
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Empty the cart
    Clear,
    /// Show cart lines and totals
    Show,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    Products {
        /// Only show this category slug
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List categories
    Categories,
}

#[derive(Subcommand)]
enum StateAction {
    /// Print the stored blob
    Show,
    /// Delete the stored blob
    Reset,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unidemy_storefront=info,unidemy_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let mut config = StoreConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        key = %config.storage_key,
        rehydrate = %config.rehydrate,
        "Opening state"
    );

    let store = Store::new(FileStorage::new(&config.data_dir), &config);
    let catalog = Catalog::bundled()?;

    match cli.command {
        Commands::Login { id, name, email } => commands::session::login(&store, id, &name, &email)?,
        Commands::Logout => commands::session::logout(&store),
        Commands::Whoami => commands::session::whoami(&store),
        Commands::Wishlist { action } => match action {
            WishlistAction::Add { id } => commands::wishlist::add(&store, &catalog, id)?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&store, id),
            WishlistAction::List => commands::wishlist::list(&store),
        },
        Commands::Cart { action } => match action {
            CartAction::Add { id, quantity } => {
                commands::cart::add(&store, &catalog, id, quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&store, id)?,
            CartAction::Update { id, quantity } => commands::cart::update(&store, id, quantity)?,
            CartAction::Move { id, quantity } => {
                commands::cart::move_to_cart(&store, &catalog, id, quantity)?;
            }
            CartAction::Clear => commands::cart::clear(&store),
            CartAction::Show => commands::cart::show(&store),
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Products { category } => {
                commands::catalog::products(&catalog, category.as_deref());
            }
            CatalogAction::Categories => commands::catalog::categories(&catalog),
        },
        Commands::State { action } => match action {
            StateAction::Show => commands::state::show(&store)?,
            StateAction::Reset => commands::state::reset(&store)?,
        },
    }

    if let Some(err) = store.last_persistence_error() {
        tracing::warn!("Changes were not saved: {err}");
    }
    Ok(())
}
