//! Order domain types.
//!
//! An `Order` and its `OrderItem`s are written together inside the checkout
//! transaction. Afterwards the order is immutable except for `status`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ovenline_core::{OrderId, OrderStatus, Price, ProductId, UserId};

/// A durable order created by checkout.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    /// Storage-assigned order ID.
    pub id: OrderId,
    /// The user who checked out.
    pub user_id: UserId,
    /// Total in cents; equals the sum of line amounts at creation time and
    /// is never recomputed.
    #[sqlx(rename = "total_cents")]
    pub total_amount: Price,
    /// Customer-supplied delivery name.
    pub customer_name: String,
    /// Customer-supplied phone number.
    pub phone: String,
    /// Customer-supplied delivery address.
    pub address: String,
    /// Fulfillment status; the only mutable field.
    pub status: OrderStatus,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// A line item snapshotting product, quantity, and price at purchase time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    /// The product purchased.
    pub product_id: ProductId,
    /// Units purchased, >= 1.
    pub quantity: u32,
    /// Unit price in cents at purchase time.
    #[sqlx(rename = "unit_price_cents")]
    pub unit_price: Price,
}

/// An order joined with its line items (owner view).
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// An order joined with its line items and purchaser identity (staff view).
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrder {
    #[serde(flatten)]
    pub order: Order,
    /// Purchaser's display name.
    pub purchaser_name: String,
    /// Purchaser's email.
    pub purchaser_email: String,
    pub items: Vec<OrderItem>,
}

/// Customer-supplied delivery details, validated non-empty before checkout.
#[derive(Debug, Clone)]
pub struct FulfillmentDetails {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
}
