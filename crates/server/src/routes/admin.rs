//! Staff order management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ovenline_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::AdminOrder;
use crate::state::AppState;

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// Status update response body.
#[derive(Debug, Serialize)]
pub struct SetStatusResponse {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// List every order, newest first, with items and purchaser identity.
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Vec<AdminOrder>>> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// Set an order's fulfillment status.
///
/// Rejects unknown status strings before touching storage, and terminal
/// orders with a conflict.
#[instrument(skip(state, admin, req), fields(admin_id = %admin.id))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<SetStatusResponse>> {
    let new_status: OrderStatus = req
        .status
        .parse()
        .map_err(|_| AppError::InvalidStatus(req.status.clone()))?;

    let order_id = OrderId::new(id);
    OrderRepository::new(state.pool())
        .set_status(order_id, new_status)
        .await?;

    tracing::info!(order_id = %order_id, status = %new_status, "order status updated");

    Ok(Json(SetStatusResponse {
        order_id,
        status: new_status,
    }))
}
