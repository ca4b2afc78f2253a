//! Browse, cart, wishlist and checkout across app restarts.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use shopfront_core::ProductId;
use shopfront_integration_tests::TestContext;
use shopfront_storefront::error::AppError;
use shopfront_storefront::models::{CatalogQuery, Product, SortOrder};
use shopfront_storefront::services::CheckoutError;
use shopfront_storefront::storage::{KeyValueStore, keys};
use shopfront_storefront::validation::ShippingForm;

fn id(raw: &str) -> ProductId {
    ProductId::new(raw)
}

fn shipping() -> ShippingForm {
    ShippingForm {
        full_name: "Ada Lovelace".into(),
        address_line: "12 Main Street".into(),
        city: "London".into(),
        postal_code: "N1 9GU".into(),
        phone: "555-0100".into(),
        email: "ada@example.com".into(),
    }
}

#[tokio::test]
async fn test_catalog_browsing() {
    let ctx = TestContext::new();
    let app = ctx.launch().await;

    assert_eq!(
        app.catalog().categories(),
        vec!["Audio", "Wearables", "Accessories", "Cameras"]
    );

    let query = CatalogQuery {
        search: Some("AUDIO".into()),
        sort: SortOrder::PriceAscending,
        ..CatalogQuery::default()
    };
    let ids: Vec<&str> = app
        .catalog()
        .query(&query)
        .into_iter()
        .map(|p| p.id().as_str())
        .collect();
    assert_eq!(ids, vec!["p3", "p1"]);

    let in_stock = CatalogQuery {
        category: Some("wearables".into()),
        in_stock_only: true,
        ..CatalogQuery::default()
    };
    let wearables = app.catalog().query(&in_stock);
    assert_eq!(wearables.len(), 1);
    assert_eq!(wearables.first().map(|p| p.id().as_str()), Some("p2"));

    let p1 = app.product(&id("p1")).unwrap();
    assert_eq!(p1.discount_percent(), Some(20));
    assert!(app.product(&id("p5")).map(Product::is_in_stock).unwrap());
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new();
    {
        let mut app = ctx.launch().await;
        app.add_to_cart(&id("p1"), 2).await.unwrap();
        app.add_to_cart(&id("p3"), 1).await.unwrap();
        app.cart_mut().increment(&id("p3")).await;
        app.cart_mut().decrement(&id("p3")).await;
    }

    let app = ctx.launch().await;
    let cart = app.cart().cart();
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.subtotal(), "459.93".parse::<Decimal>().unwrap());
    assert_eq!(app.price(cart.subtotal()).display(), "$459.93");
}

#[tokio::test]
async fn test_wishlist_to_cart_to_order() {
    let ctx = TestContext::new();
    let mut app = ctx.launch().await;

    assert!(app.toggle_wishlist(&id("p5")).await.unwrap());
    assert!(app.toggle_wishlist(&id("p7")).await.unwrap());
    assert!(!app.toggle_wishlist(&id("p7")).await.unwrap());

    let mut app = ctx.launch().await;
    assert_eq!(app.wishlist().wishlist().len(), 1);
    assert!(app.move_to_cart(&id("p5")).await.unwrap());
    assert!(!app.move_to_cart(&id("p5")).await.unwrap());
    app.add_to_cart(&id("p8"), 2).await.unwrap();

    let order = app.place_order(&shipping()).await.unwrap();
    assert_eq!(order.item_count, 3);
    assert_eq!(order.subtotal, "199.48".parse::<Decimal>().unwrap());
    assert_eq!(order.shipping.email.unwrap().as_str(), "ada@example.com");
    assert!(app.cart().cart().is_empty());

    let storage = ctx.storage();
    assert_eq!(storage.get(keys::CART).await, None);
    assert_eq!(storage.get(keys::WISHLIST).await, None);
    assert!(ctx.launch().await.cart().cart().is_empty());
}

#[tokio::test]
async fn test_checkout_rejections_leave_cart_alone() {
    let ctx = TestContext::new();
    let mut app = ctx.launch().await;

    let err = app.place_order(&shipping()).await.unwrap_err();
    assert!(matches!(err, AppError::Checkout(CheckoutError::EmptyCart)));

    app.add_to_cart(&id("p2"), 1).await.unwrap();
    let err = app
        .place_order(&ShippingForm::default())
        .await
        .unwrap_err();
    assert!(err.is_user_error());
    let AppError::Checkout(CheckoutError::Validation(fields)) = err else {
        panic!("expected validation error");
    };
    assert_eq!(fields.get("city"), Some("City is required"));
    assert_eq!(app.cart().cart().item_count(), 1);
}

#[tokio::test]
async fn test_cart_persistence_can_be_disabled() {
    let mut ctx = TestContext::new();
    ctx.config.persist_cart = false;

    let mut app = ctx.launch().await;
    app.add_to_cart(&id("p1"), 1).await.unwrap();
    app.toggle_wishlist(&id("p2")).await.unwrap();

    let app = ctx.launch().await;
    assert!(app.cart().cart().is_empty());
    assert!(app.wishlist().wishlist().is_empty());
}

#[tokio::test]
async fn test_corrupt_cart_file_starts_empty() {
    let ctx = TestContext::new();
    assert!(ctx.storage().set(keys::CART, "[{\"broken\":").await);
    let app = ctx.launch().await;
    assert!(app.cart().cart().is_empty());
}
