//! # Cart Seed Generator
//!
//! Writes a pre-filled cart into the key-value store for development.
//!
//! ## Usage
//! ```bash
//! # Seed 5 cart lines (default)
//! cargo run -p market-db --bin seed
//!
//! # Custom amount and database path
//! cargo run -p market-db --bin seed -- --count 12 --db ./data/gomarketplace.db
//!
//! # Replace an existing cart
//! cargo run -p market-db --bin seed -- --force
//! ```
//!
//! ## Generated Cart
//! Each line has a UUID id, a catalog title, a placeholder image URL, a
//! price between 9.90 and 199.90 and a quantity of 1 to 3. The value is
//! written in the persisted cart format under the products key, exactly
//! as the storefront writes it.

use clap::Parser;
use market_core::{codec, CartAction, CartProduct, CartState, PRODUCTS_STORAGE_KEY};
use market_db::{migrations, Database, DbConfig, KeyValueStore};
use uuid::Uuid;

/// Catalog titles used for seeded cart lines.
const CATALOG: &[&str] = &[
    "Camiseta Rocketseat",
    "Camiseta Ignite",
    "Moletom Preto",
    "Boné Trucker",
    "Caneca Dev",
    "Mochila Notebook",
    "Adesivos Pack",
    "Meia Colorida",
    "Jaqueta Corta-vento",
    "Garrafa Térmica",
];

/// GoMarketplace cart seed generator
#[derive(Parser)]
#[command(name = "seed", version, about)]
struct Args {
    /// Number of cart lines to generate
    #[arg(short, long, default_value_t = 5)]
    count: usize,

    /// Database file path
    #[arg(short, long, default_value = "./gomarketplace_dev.db", env = "MARKET_DB_PATH")]
    db: String,

    /// Overwrite an existing cart
    #[arg(short, long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 GoMarketplace Cart Seed Generator");
    println!("====================================");
    println!("Database: {}", args.db);
    println!("Lines:    {}", args.count);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    let kv = db.kv();

    let (total, applied) = migrations::migration_status(db.pool()).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied ({}/{})", applied, total);
    println!("  Stored keys: {}", kv.count().await?);

    if !args.force && kv.get(PRODUCTS_STORAGE_KEY).await?.is_some() {
        println!("⚠ A cart is already stored under {}", PRODUCTS_STORAGE_KEY);
        println!("  Skipping seed. Pass --force to replace it.");
        return Ok(());
    }

    let cart = generate_cart(args.count);
    let raw = codec::encode(&cart)?;
    kv.set(PRODUCTS_STORAGE_KEY, &raw).await?;

    println!();
    println!(
        "✓ Stored {} lines ({} units, {} bytes)",
        cart.item_count(),
        cart.total_quantity(),
        raw.len()
    );
    if let Some(entry) = kv.entry(PRODUCTS_STORAGE_KEY).await? {
        println!("  {} updated at {}", entry.key, entry.updated_at.to_rfc3339());
    }

    db.close().await;
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds a cart through the reducer so every invariant holds.
fn generate_cart(count: usize) -> CartState {
    let mut cart = CartState::new();

    for seed in 0..count {
        let product = generate_product(seed);
        let id = product.id.clone();

        cart.apply(CartAction::Add(product));
        for _ in 0..(seed % 3) {
            cart.apply(CartAction::Increment(id.clone()));
        }
    }

    cart
}

/// Generates a single product descriptor.
fn generate_product(seed: usize) -> CartProduct {
    let title = CATALOG[seed % CATALOG.len()];
    let edition = seed / CATALOG.len();

    // 9.90 - 199.90 in steps of 0.10
    let price_tenths = 99 + (seed * 37) % 1901;

    CartProduct {
        id: Uuid::new_v4().to_string(),
        title: if edition == 0 {
            title.to_string()
        } else {
            format!("{} #{}", title, edition + 1)
        },
        image_url: format!("https://storage.gomarketplace.dev/products/{}.png", seed),
        price: price_tenths as f64 / 10.0,
    }
}
