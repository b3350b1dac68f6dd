//! Registration, login, and logout tests.

mod common;

use axum::http::StatusCode;
use common::{Client, MARGHERITA, add_to_cart, register, spawn};
use serde_json::json;

#[tokio::test]
async fn register_logs_the_user_in() {
    let app = spawn().await;
    let mut client = Client::new(&app);

    let body = register(&mut client, "Ada", "ada@example.com", "long password").await;
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["is_admin"], false);

    // The session cookie is live: an authenticated endpoint no longer 401s
    add_to_cart(&mut client, MARGHERITA.0, 1).await;
    let (status, _) = client
        .post(
            "/checkout",
            json!({ "name": "Ada", "phone": "555-0100", "address": "1 Test Lane" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn register_validates_input() {
    let app = spawn().await;
    let mut client = Client::new(&app);

    let (status, _) = client
        .post(
            "/auth/register",
            json!({ "name": "", "email": "ada@example.com", "password": "long password" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client
        .post(
            "/auth/register",
            json!({ "name": "Ada", "email": "not-an-email", "password": "long password" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = client
        .post(
            "/auth/register",
            json!({ "name": "Ada", "email": "ada@example.com", "password": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].as_str().expect("error").contains("8"),
        "password rule is stated"
    );
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = spawn().await;

    let mut first = Client::new(&app);
    register(&mut first, "Ada", "ada@example.com", "long password").await;

    let mut second = Client::new(&app);
    let (status, _) = second
        .post(
            "/auth/register",
            json!({ "name": "Imposter", "email": "ada@example.com", "password": "long password" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_rejects_bad_credentials_uniformly() {
    let app = spawn().await;

    let mut setup = Client::new(&app);
    register(&mut setup, "Ada", "ada@example.com", "long password").await;

    let mut client = Client::new(&app);

    // Wrong password and unknown account look identical
    let (status, wrong_pw) = client
        .post(
            "/auth/login",
            json!({ "email": "ada@example.com", "password": "wrong password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, no_user) = client
        .post(
            "/auth/login",
            json!({ "email": "ghost@example.com", "password": "long password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw, no_user);
}

#[tokio::test]
async fn me_reflects_login_state() {
    let app = spawn().await;
    let mut client = Client::new(&app);

    let (status, body) = client.get("/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    register(&mut client, "Ada", "ada@example.com", "long password").await;

    let (status, body) = client.get("/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ada@example.com");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = spawn().await;
    let mut client = Client::new(&app);

    register(&mut client, "Ada", "ada@example.com", "long password").await;
    add_to_cart(&mut client, MARGHERITA.0, 1).await;

    let (status, _) = client.post("/auth/logout", json!({})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The old identity and the cart are gone
    let (status, _) = client
        .post(
            "/checkout",
            json!({ "name": "Ada", "phone": "555-0100", "address": "1 Test Lane" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, cart) = client.get("/cart").await;
    assert_eq!(cart["total_quantity"], 0);
}
