//! Checkout: convert the session cart into a durable order.
//!
//! The only path that turns volatile cart state into storage. Validation
//! happens before any write; the writes themselves run inside one repository
//! transaction; the session cart is cleared only after that transaction
//! commits. A failed checkout leaves the cart intact so the customer can
//! retry.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use ovenline_core::OrderId;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::FulfillmentDetails;
use crate::routes::cart::{clear_cart, load_cart};
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Checkout response body.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: OrderId,
}

impl CheckoutRequest {
    /// Validate the delivery fields, naming every missing one.
    fn into_details(self) -> Result<FulfillmentDetails> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        if !missing.is_empty() {
            return Err(AppError::InvalidFulfillmentDetails(missing));
        }

        Ok(FulfillmentDetails {
            customer_name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}

/// Place an order from the current session cart.
#[instrument(skip(state, user, session, req), fields(user_id = %user.id))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let details = req.into_details()?;

    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let order_id = OrderRepository::new(state.pool())
        .create_from_cart(user.id, &details, &cart)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "checkout transaction failed");
            AppError::CheckoutFailed
        })?;

    // The order is durable; the cart must not survive it.
    clear_cart(&session).await?;

    tracing::info!(order_id = %order_id, total = %cart.total_amount(), "order placed");

    Ok((StatusCode::CREATED, Json(CheckoutResponse { order_id })))
}
