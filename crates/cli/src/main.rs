//! GameVerse CLI - Browse the catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # Browse games, optionally filtered
//! gameverse games --genre action --search "far cry"
//!
//! # Quick view of a game, adding it to the cart
//! gameverse game 2 --add
//!
//! # Manage the cart
//! gameverse cart add 1
//! gameverse cart show
//!
//! # Sign in
//! gameverse login --email gamer@verse.io --password hunter22
//!
//! # Place and confirm an order
//! gameverse checkout --name .. --email .. --card-number .. --expiry 09/27 --cvv 123
//! ```
//!
//! The cart persists to `GAMEVERSE_CART_FILE` between runs. See [`config`] for
//! all environment variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use gameverse_core::{CartManager, GenreFilter, ItemId, Storefront};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;
mod store;

use commands::checkout::CheckoutArgs;
use config::GameverseConfig;
use render::Money;
use store::FileStore;

#[derive(Parser)]
#[command(name = "gameverse")]
#[command(author, version, about = "GameVerse storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List games
    Games {
        /// Genre to show, or "all"
        #[arg(short, long, default_value = "all")]
        genre: GenreFilter,

        /// Case-insensitive title search
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one game
    Game {
        /// Game id
        id: ItemId,

        /// Also add the game to the cart
        #[arg(long)]
        add: bool,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place and confirm an order for the cart
    Checkout(CheckoutArgs),
    /// Sign in
    Login {
        /// Account email
        #[arg(long, default_value = "")]
        email: String,

        /// Account password
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Create an account
    Signup,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a game
    Add {
        /// Game id
        id: ItemId,
    },
    /// Remove a game from the cart
    Remove {
        /// Game id
        id: ItemId,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    // Logs go to stderr so they never interleave with rendered output.
    // Defaults to info level for our crates if RUST_LOG is not set.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "gameverse=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = GameverseConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let catalog = config.load_catalog()?;
    let cart = CartManager::load(FileStore::new(&config.cart_file)).with_tax_rate(config.tax_rate);
    let mut storefront = Storefront::new(catalog, cart);
    let money = Money(config.currency);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Games { genre, search } => {
            commands::catalog::list(&mut storefront, &mut out, genre, search, money)?;
        }
        Commands::Game { id, add } => {
            commands::catalog::show(&storefront, &mut out, id, money)?;
            if add {
                commands::catalog::buy(&mut storefront, &mut out, id)?;
            }
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront, &mut out, money)?,
            CartAction::Add { id } => commands::cart::add(&mut storefront, &mut out, id, money)?,
            CartAction::Remove { id } => {
                commands::cart::remove(&mut storefront, &mut out, id, money)?;
            }
            CartAction::Clear => commands::cart::clear(&mut storefront, &mut out)?,
        },
        Commands::Checkout(args) => commands::checkout::run(&mut storefront, &mut out, args, money)?,
        Commands::Login { email, password } => {
            commands::account::login(&mut storefront, &mut out, email, password)?;
        }
        Commands::Signup => commands::account::signup(&mut storefront, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
