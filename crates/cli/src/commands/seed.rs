//! Seed the database with the pizza catalog and demo accounts.
//!
//! Wipes existing orders, products, and users, then inserts the standard
//! catalog plus an admin and a regular demo account. Intended for local
//! development and demos, not production.

use ovenline_server::services::auth::hash_password;

use super::{CommandError, connect};

/// Demo admin credentials.
const ADMIN_EMAIL: &str = "admin@ovenline.local";
const ADMIN_PASSWORD: &str = "admin123!";

/// Demo customer credentials.
const USER_EMAIL: &str = "user@ovenline.local";
const USER_PASSWORD: &str = "user1234";

/// The seed catalog: name, description, price in cents, image filename.
const PRODUCTS: &[(&str, &str, i64, &str)] = &[
    (
        "Margherita",
        "Classic tomato, mozzarella, basil",
        899,
        "margherita.jpg",
    ),
    (
        "Pepperoni",
        "Loaded with pepperoni slices",
        1099,
        "pepperoni.jpg",
    ),
    (
        "Veggie Delight",
        "Bell peppers, onions, olives, mushrooms",
        999,
        "veggie.jpg",
    ),
    (
        "BBQ Chicken",
        "BBQ sauce, chicken, onion, cilantro",
        1199,
        "bbq-chicken.jpg",
    ),
    (
        "Hawaiian",
        "Ham and pineapple (controversial but tasty!)",
        1099,
        "hawaiian.jpg",
    ),
];

/// Reset and seed the database.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let mut tx = pool.begin().await?;

    // Order matters for foreign keys.
    sqlx::query("DELETE FROM order_items")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM orders").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM products")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM users").execute(&mut *tx).await?;

    for (name, description, price_cents, image) in PRODUCTS {
        sqlx::query(
            "INSERT INTO products (name, description, price_cents, image) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(description)
        .bind(price_cents)
        .bind(image)
        .execute(&mut *tx)
        .await?;
    }

    let admin_hash = hash_password(ADMIN_PASSWORD).map_err(|_| CommandError::PasswordHash)?;
    sqlx::query(
        "INSERT INTO users (name, email, password_hash, is_admin, created_at)
         VALUES (?1, ?2, ?3, 1, datetime('now'))",
    )
    .bind("Admin")
    .bind(ADMIN_EMAIL)
    .bind(&admin_hash)
    .execute(&mut *tx)
    .await?;

    let user_hash = hash_password(USER_PASSWORD).map_err(|_| CommandError::PasswordHash)?;
    sqlx::query(
        "INSERT INTO users (name, email, password_hash, is_admin, created_at)
         VALUES (?1, ?2, ?3, 0, datetime('now'))",
    )
    .bind("Test User")
    .bind(USER_EMAIL)
    .bind(&user_hash)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Database reset complete.");
    tracing::info!("  Admin -> email: {ADMIN_EMAIL}, password: {ADMIN_PASSWORD}");
    tracing::info!("  User  -> email: {USER_EMAIL}, password: {USER_PASSWORD}");
    tracing::info!("  {} products seeded.", PRODUCTS.len());

    Ok(())
}
