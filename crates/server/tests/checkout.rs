//! Checkout transaction tests.

mod common;

use axum::http::StatusCode;
use common::{Client, MARGHERITA, PEPPERONI, add_to_cart, register, spawn};
use serde_json::json;

use ovenline_core::{Cart, Price, ProductId, UserId};
use ovenline_server::db::OrderRepository;
use ovenline_server::models::FulfillmentDetails;

#[tokio::test]
async fn checkout_requires_login() {
    let app = spawn().await;
    let mut client = Client::new(&app);

    add_to_cart(&mut client, MARGHERITA.0, 1).await;

    let (status, _) = client
        .post(
            "/checkout",
            json!({ "name": "A", "phone": "1", "address": "B" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn checkout_rejects_empty_cart() {
    let app = spawn().await;
    let mut client = Client::new(&app);
    register(&mut client, "Ada", "ada@example.com", "long password").await;

    let (status, body) = client
        .post(
            "/checkout",
            json!({ "name": "A", "phone": "1", "address": "B" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "cart is empty");
}

#[tokio::test]
async fn checkout_names_every_missing_field() {
    let app = spawn().await;
    let mut client = Client::new(&app);
    register(&mut client, "Ada", "ada@example.com", "long password").await;
    add_to_cart(&mut client, MARGHERITA.0, 1).await;

    let (status, body) = client
        .post("/checkout", json!({ "address": "1 Test Lane" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("name"), "got: {message}");
    assert!(message.contains("phone"), "got: {message}");

    // Validation failure left the cart alone
    let (_, cart) = client.get("/cart").await;
    assert_eq!(cart["total_quantity"], 1);
}

#[tokio::test]
async fn checkout_creates_order_and_clears_cart() {
    let app = spawn().await;
    let mut client = Client::new(&app);
    register(&mut client, "Ada", "ada@example.com", "long password").await;

    add_to_cart(&mut client, MARGHERITA.0, 2).await;
    add_to_cart(&mut client, PEPPERONI.0, 1).await;

    let order_id = common::checkout(&mut client).await;

    // The order reflects the cart at checkout time
    let (status, order) = client.get(&format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["total_amount"], 2 * MARGHERITA.2 + PEPPERONI.2);
    assert_eq!(order["customer_name"], "Test Customer");

    let items = order["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product_id"], MARGHERITA.0);
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["unit_price"], MARGHERITA.2);

    // The cart did not survive the order
    let (_, cart) = client.get("/cart").await;
    assert_eq!(cart["total_quantity"], 0);
}

#[tokio::test]
async fn order_total_is_frozen_at_checkout() {
    let app = spawn().await;
    let mut client = Client::new(&app);
    register(&mut client, "Ada", "ada@example.com", "long password").await;

    add_to_cart(&mut client, MARGHERITA.0, 1).await;
    let order_id = common::checkout(&mut client).await;

    // A later price change must not touch the stored order
    sqlx::query("UPDATE products SET price_cents = 1 WHERE id = ?1")
        .bind(MARGHERITA.0)
        .execute(&app.pool)
        .await
        .expect("update price");

    let (_, order) = client.get(&format!("/orders/{order_id}")).await;
    assert_eq!(order["total_amount"], MARGHERITA.2);
    assert_eq!(order["items"][0]["unit_price"], MARGHERITA.2);
}

#[tokio::test]
async fn failed_checkout_writes_nothing() {
    let app = spawn().await;
    let mut client = Client::new(&app);
    let registered = register(&mut client, "Ada", "ada@example.com", "long password").await;
    let user_id = UserId::new(registered["id"].as_i64().expect("user id"));

    // A cart referencing a product that no longer exists makes the item
    // insert fail mid-transaction
    let mut cart = Cart::default();
    cart.add_item(ProductId::new(MARGHERITA.0), MARGHERITA.1, Price::from_cents(MARGHERITA.2), 1);
    cart.add_item(ProductId::new(999), "Ghost", Price::from_cents(100), 1);

    let details = FulfillmentDetails {
        customer_name: "Test Customer".to_string(),
        phone: "555-0100".to_string(),
        address: "1 Test Lane".to_string(),
    };

    let result = OrderRepository::new(&app.pool)
        .create_from_cart(user_id, &details, &cart)
        .await;
    assert!(result.is_err(), "foreign key violation must fail checkout");

    // Neither the order row nor any item row survived
    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&app.pool)
        .await
        .expect("count orders");
    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(&app.pool)
        .await
        .expect("count items");
    assert_eq!(orders, 0);
    assert_eq!(items, 0);
}
