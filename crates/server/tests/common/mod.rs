//! Shared test harness.
//!
//! Builds the full router against an in-memory `SQLite` database and drives
//! it in-process with `tower::ServiceExt::oneshot`, carrying the session
//! cookie between requests the way a browser would.

#![allow(dead_code)]

use std::str::FromStr;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use ovenline_server::build_router;
use ovenline_server::config::ServerConfig;
use ovenline_server::db::MIGRATOR;
use ovenline_server::services::auth::hash_password;
use ovenline_server::state::AppState;

/// The seeded catalog: (id, name, price in cents).
pub const MARGHERITA: (i64, &str, i64) = (1, "Margherita", 899);
pub const PEPPERONI: (i64, &str, i64) = (2, "Pepperoni", 1099);

/// A fully wired application over an in-memory database.
pub struct TestApp {
    router: Router,
    pub pool: SqlitePool,
}

/// Build the application with migrations run and the catalog seeded.
pub async fn spawn() -> TestApp {
    // A single connection keeps every query on the same in-memory database.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect to in-memory sqlite");

    MIGRATOR.run(&pool).await.expect("run migrations");
    seed_products(&pool).await;

    let config = ServerConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
    };

    let router = build_router(AppState::new(config, pool.clone()))
        .await
        .expect("build router");

    TestApp { router, pool }
}

async fn seed_products(pool: &SqlitePool) {
    let products: &[(&str, &str, i64)] = &[
        ("Margherita", "Classic tomato, mozzarella, basil", 899),
        ("Pepperoni", "Loaded with pepperoni slices", 1099),
        ("Veggie Delight", "Bell peppers, onions, olives, mushrooms", 999),
        ("BBQ Chicken", "BBQ sauce, chicken, onion, cilantro", 1199),
        ("Hawaiian", "Ham and pineapple (controversial but tasty!)", 1099),
    ];
    for (name, description, price_cents) in products {
        sqlx::query(
            "INSERT INTO products (name, description, price_cents, image) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(description)
        .bind(price_cents)
        .bind(format!("{}.jpg", name.to_lowercase().replace(' ', "-")))
        .execute(pool)
        .await
        .expect("seed product");
    }
}

/// An in-process HTTP client with a cookie jar of one.
pub struct Client {
    router: Router,
    cookie: Option<String>,
}

impl Client {
    pub fn new(app: &TestApp) -> Self {
        Self {
            router: app.router.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, path: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&mut self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn request(
        &mut self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let raw = set_cookie.to_str().expect("cookie is ascii");
            self.cookie = Some(raw.split(';').next().unwrap_or(raw).to_string());
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }
}

/// Register a fresh account and leave the client logged in.
pub async fn register(client: &mut Client, name: &str, email: &str, password: &str) -> Value {
    let (status, body) = client
        .post(
            "/auth/register",
            json!({ "name": name, "email": email, "password": password }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body
}

/// Insert an admin account directly, bypassing the public register endpoint.
pub async fn create_admin(app: &TestApp, email: &str, password: &str) {
    let password_hash = hash_password(password).expect("hash password");
    sqlx::query(
        "INSERT INTO users (name, email, password_hash, is_admin, created_at)
         VALUES (?1, ?2, ?3, 1, datetime('now'))",
    )
    .bind("Admin")
    .bind(email)
    .bind(&password_hash)
    .execute(&app.pool)
    .await
    .expect("create admin");
}

/// Log in an existing account.
pub async fn login(client: &mut Client, email: &str, password: &str) {
    let (status, body) = client
        .post("/auth/login", json!({ "email": email, "password": password }))
        .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
}

/// Add a product to the client's session cart.
pub async fn add_to_cart(client: &mut Client, product_id: i64, quantity: u32) -> Value {
    let (status, body) = client
        .post(
            "/cart/add",
            json!({ "product_id": product_id, "quantity": quantity }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "cart add failed: {body}");
    body
}

/// Place an order with valid delivery details, returning its id.
pub async fn checkout(client: &mut Client) -> i64 {
    let (status, body) = client
        .post(
            "/checkout",
            json!({
                "name": "Test Customer",
                "phone": "555-0100",
                "address": "1 Test Lane",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "checkout failed: {body}");
    body["order_id"].as_i64().expect("order_id in response")
}
