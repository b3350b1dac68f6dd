//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (verifies database)
//!
//! # Catalog
//! GET  /products                  - Product listing (stable order)
//! GET  /products/{id}             - Product detail
//!
//! # Cart (session-scoped)
//! GET  /cart                      - Cart snapshot
//! POST /cart/add                  - Add product (quantity coerced to >= 1)
//! POST /cart/remove               - Remove product (idempotent)
//!
//! # Checkout
//! POST /checkout                  - Convert cart to order (requires auth)
//!
//! # Orders
//! GET  /orders/{id}               - Order + items, owner only (requires auth)
//!
//! # Admin (requires admin)
//! GET  /admin/orders              - All orders with items and purchaser
//! POST /admin/orders/{id}/status  - Update fulfillment status
//!
//! # Auth
//! POST /auth/register             - Register and log in
//! POST /auth/login                - Login
//! POST /auth/logout               - Logout (destroys the session)
//! GET  /auth/me                   - Current identity, or null for guests
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/{id}", get(catalog::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin::list_orders))
        .route("/orders/{id}/status", post(admin::set_status))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", catalog_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::checkout))
        .route("/orders/{id}", get(orders::show))
        .nest("/admin", admin_routes())
        .nest("/auth", auth_routes())
}
