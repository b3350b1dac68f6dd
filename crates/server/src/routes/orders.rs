//! Customer order views.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use ovenline_core::OrderId;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::OrderWithItems;
use crate::state::AppState;

/// Show one order with its items.
///
/// Only the owner sees it; anyone else gets the same 404 as for an order that
/// does not exist.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Json<OrderWithItems>> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(OrderId::new(id), user.id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(order))
}
