//! End-to-end cart persistence against a SQLite file.

use std::sync::Arc;

use market_core::{codec, CartProduct, LEGACY_PRODUCT_STORAGE_KEY, PRODUCTS_STORAGE_KEY};
use market_db::{Database, DbConfig, KeyValueStore};
use storefront::commands::CartCommand;
use storefront::provider::{CartProvider, ViewScope};
use storefront::state::CartConfig;
use storefront::{run_once, use_cart, CartError};
use tempfile::TempDir;

fn product(id: &str, title: &str, price: f64) -> CartProduct {
    CartProduct {
        id: id.to_string(),
        title: title.to_string(),
        image_url: format!("https://img.example/{}.png", id),
        price,
    }
}

async fn open(dir: &TempDir) -> Database {
    Database::new(DbConfig::new(dir.path().join("cart.db")))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_cart_survives_remount() {
    let dir = TempDir::new().unwrap();

    {
        let db = open(&dir).await;
        let scope = ViewScope::root();
        let mut provider = CartProvider::mount(&scope, Arc::new(db.kv()), CartConfig::default());
        provider.ready().await;

        let cart = use_cart(&scope.child()).unwrap();
        cart.add_to_cart(product("p1", "Shirt", 10.0)).unwrap();
        cart.add_to_cart(product("p2", "Mug", 7.5)).unwrap();
        cart.increment("p1");
        cart.increment("p1");
        cart.decrement("p2");
        cart.flush().await.unwrap();

        provider.unmount().await;
        db.close().await;
    }

    let db = open(&dir).await;
    let scope = ViewScope::root();
    let mut provider = CartProvider::mount(&scope, Arc::new(db.kv()), CartConfig::default());
    provider.ready().await;

    let items = use_cart(&scope).unwrap().products();
    assert_eq!(items.len(), 2);
    assert_eq!((items[0].id.as_str(), items[0].quantity), ("p1", 3));
    assert_eq!((items[1].id.as_str(), items[1].quantity), ("p2", 1));
    assert_eq!(items[1].price, 7.5);

    provider.unmount().await;
    db.close().await;
}

#[tokio::test]
async fn test_invalid_add_does_not_cost_the_cart_on_remount() {
    let dir = TempDir::new().unwrap();

    {
        let db = open(&dir).await;
        let scope = ViewScope::root();
        let mut provider = CartProvider::mount(&scope, Arc::new(db.kv()), CartConfig::default());
        provider.ready().await;

        let cart = use_cart(&scope).unwrap();
        cart.add_to_cart(product("p1", "Shirt", 10.0)).unwrap();
        assert!(cart.add_to_cart(product("p2", "Broken", -1.0)).is_err());
        assert!(cart.add_to_cart(product("", "No id", 1.0)).is_err());
        cart.flush().await.unwrap();

        provider.unmount().await;
        db.close().await;
    }

    let db = open(&dir).await;
    let response = run_once(Arc::new(db.kv()), CartConfig::default(), CartCommand::List)
        .await
        .unwrap();
    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0].id, "p1");

    db.close().await;
}

#[tokio::test]
async fn test_run_once_persists_each_command() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir).await;
    let kv = Arc::new(db.kv());

    run_once(
        Arc::clone(&kv),
        CartConfig::default(),
        CartCommand::Add(product("p1", "Shirt", 10.0)),
    )
    .await
    .unwrap();
    run_once(
        Arc::clone(&kv),
        CartConfig::default(),
        CartCommand::Increment("p1".to_string()),
    )
    .await
    .unwrap();

    let response = run_once(Arc::clone(&kv), CartConfig::default(), CartCommand::List)
        .await
        .unwrap();
    assert_eq!(response.items[0].quantity, 2);
    assert_eq!(response.totals.total_quantity, 2);

    let raw = kv.get(PRODUCTS_STORAGE_KEY).await.unwrap().unwrap();
    assert_eq!(codec::decode(&raw).unwrap().items(), response.items.as_slice());

    db.close().await;
}

#[tokio::test]
async fn test_legacy_cart_is_migrated() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir).await;
    let kv = Arc::new(db.kv());

    kv.set(
        LEGACY_PRODUCT_STORAGE_KEY,
        r#"[{"id":"old","title":"Old Shirt","image_url":"o","price":19.9,"quantity":2}]"#,
    )
    .await
    .unwrap();

    let response = run_once(Arc::clone(&kv), CartConfig::default(), CartCommand::List)
        .await
        .unwrap();
    assert_eq!(response.items[0].id, "old");

    let migrated = kv.get(PRODUCTS_STORAGE_KEY).await.unwrap().unwrap();
    assert_eq!(codec::decode(&migrated).unwrap().get("old").unwrap().quantity, 2);

    db.close().await;
}

#[tokio::test]
async fn test_malformed_row_loads_as_empty_cart() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir).await;
    let kv = Arc::new(db.kv());

    kv.set(PRODUCTS_STORAGE_KEY, "[{\"id\":").await.unwrap();

    let response = run_once(Arc::clone(&kv), CartConfig::default(), CartCommand::List)
        .await
        .unwrap();
    assert!(response.items.is_empty());

    // The first real change overwrites the bad row.
    run_once(
        Arc::clone(&kv),
        CartConfig::default(),
        CartCommand::Add(product("p1", "Shirt", 10.0)),
    )
    .await
    .unwrap();
    let raw = kv.get(PRODUCTS_STORAGE_KEY).await.unwrap().unwrap();
    assert_eq!(codec::decode(&raw).unwrap().item_count(), 1);

    db.close().await;
}

#[test]
fn test_use_cart_without_provider() {
    let scope = ViewScope::root();

    let err = use_cart(&scope.child()).unwrap_err();
    assert!(matches!(err, CartError::OutsideProvider));
}
