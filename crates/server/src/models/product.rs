//! Catalog product type.

use serde::Serialize;

use ovenline_core::{Price, ProductId};

/// An immutable catalog record: a purchasable item with its current price.
///
/// Created and seeded out of band; read-only to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Product {
    /// Unique, stable product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short description for listings.
    pub description: String,
    /// Price in cents.
    #[sqlx(rename = "price_cents")]
    pub price: Price,
    /// Optional image filename.
    pub image: Option<String>,
}
