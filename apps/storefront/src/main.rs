//! # Storefront CLI
//!
//! Runs a single cart command against the persisted cart.
//!
//! ```bash
//! storefront add --id p1 --title Shirt --image-url https://img/p1.png --price 10
//! storefront increment p1
//! storefront list
//! storefront --ephemeral add --id p1 --title Shirt --price 10
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use market_core::CartProduct;
use market_db::{Database, DbConfig, MemoryKvStore};
use tracing::info;

use storefront::commands::{CartCommand, CartResponse};
use storefront::{init_tracing, run_once, StorefrontConfig};

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "GoMarketplace cart from the command line")]
struct Args {
    /// SQLite database file (overrides MARKET_DB_PATH)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Storage key for the cart (overrides MARKET_CART_KEY)
    #[arg(long)]
    key: Option<String>,

    /// Keep the cart in memory only
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the cart
    List,

    /// Add one unit of a product
    Add {
        #[arg(long)]
        id: String,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        image_url: String,

        #[arg(long)]
        price: f64,
    },

    /// Add one unit to a cart line
    Increment { id: String },

    /// Remove one unit from a cart line (never below one)
    Decrement { id: String },
}

impl From<Command> for CartCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::List => CartCommand::List,
            Command::Add {
                id,
                title,
                image_url,
                price,
            } => CartCommand::Add(CartProduct {
                id,
                title,
                image_url,
                price,
            }),
            Command::Increment { id } => CartCommand::Increment(id),
            Command::Decrement { id } => CartCommand::Decrement(id),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();
    let mut config = StorefrontConfig::from_env();
    if let Some(db) = args.db {
        config.database_path = db;
    }
    if let Some(key) = args.key {
        config.cart.storage_key = key;
    }

    let command = CartCommand::from(args.command);

    let response: CartResponse = if args.ephemeral {
        info!("Using in-memory cart storage");
        run_once(Arc::new(MemoryKvStore::new()), config.cart, command).await?
    } else {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        info!(db_path = ?config.database_path, "Opening cart database");

        let db = Database::new(DbConfig::new(config.database_path.clone())).await?;
        let result = run_once(Arc::new(db.kv()), config.cart, command).await;
        db.close().await;
        result?
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
