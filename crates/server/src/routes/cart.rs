//! Cart route handlers.
//!
//! The cart is loaded from and saved back to the session around every
//! mutation; nothing here touches durable storage except the catalog lookup
//! that snapshots price and name at add-time.

use axum::{Json, extract::State};
use serde::{Deserialize, Deserializer, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use ovenline_core::{Cart, CartLine, Price, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub line_amount: Price,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total_amount: Price,
    pub total_quantity: u32,
    /// Formatted total (e.g., "$17.98").
    pub total_display: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total_amount: cart.total_amount(),
            total_quantity: cart.total_quantity(),
            total_display: cart.total_amount().to_string(),
        }
    }
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            line_amount: line.line_amount(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the session cart, or an empty one on first access.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Save the cart back to the session.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Drop the session cart entirely (post-checkout).
pub async fn clear_cart(session: &Session) -> Result<()> {
    session.remove::<Cart>(session_keys::CART).await?;
    Ok(())
}

// =============================================================================
// Requests
// =============================================================================

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i64,
    /// Coerced to an integer >= 1; fractional input truncates, non-numeric
    /// or non-positive input clamps to 1. This mirrors the long-standing
    /// storefront behavior and is a documented default, not a validation gap.
    #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: i64,
}

const fn default_quantity() -> u32 {
    1
}

/// Accept a quantity as a JSON number or string; anything unusable becomes 1.
fn lenient_quantity<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_quantity(&value))
}

/// Clamp arbitrary client input to a usable quantity. Fractional numbers
/// truncate toward zero before the clamp.
#[allow(clippy::cast_possible_truncation)]
fn coerce_quantity(value: &serde_json::Value) -> u32 {
    let parsed = match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(q) if q >= 1 => u32::try_from(q).unwrap_or(u32::MAX),
        _ => 1,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Current cart snapshot.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add a product to the cart.
///
/// Resolves the product through the catalog so the line snapshots today's
/// price and name; fails without mutating the cart if the product is unknown.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(req.product_id))
        .await?
        .ok_or(AppError::ProductNotFound)?;

    let mut cart = load_cart(&session).await?;
    cart.add_item(product.id, &product.name, product.price, req.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Remove a product from the cart. A no-op if the product isn't in it.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(req): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.remove_item(ProductId::new(req.product_id));
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}
