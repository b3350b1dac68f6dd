//! Order repository: the checkout transaction and lifecycle reads/writes.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{FromRow, Row, SqlitePool};
use thiserror::Error;

use ovenline_core::{Cart, OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::{AdminOrder, FulfillmentDetails, Order, OrderItem, OrderWithItems};

/// Errors from a status update.
#[derive(Debug, Error)]
pub enum StatusError {
    /// No order with the given ID exists.
    #[error("order not found")]
    NotFound,

    /// The order is in a terminal state and accepts no further writes.
    #[error("order is already {0} and cannot change status")]
    Terminal(OrderStatus),

    /// Underlying storage failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for StatusError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Convert a cart into one durable order with its line items.
    ///
    /// Runs as a single transaction: the order row and every item row are
    /// written together, or not at all. The order total is taken from the
    /// cart's derived total and never recomputed afterwards.
    ///
    /// The caller is responsible for checking that the cart is non-empty and
    /// the fulfillment details are valid, and for clearing the session cart
    /// only after this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert or the commit fails;
    /// in that case nothing is written.
    pub async fn create_from_cart(
        &self,
        user_id: UserId,
        details: &FulfillmentDetails,
        cart: &Cart,
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r"
            INSERT INTO orders (user_id, total_cents, customer_name, phone, address, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(cart.total_amount())
        .bind(&details.customer_name)
        .bind(&details.phone)
        .bind(&details.address)
        .bind(OrderStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let order_id: OrderId = row.try_get("id")?;

        for line in cart.lines() {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
                VALUES (?1, ?2, ?3, ?4)
                ",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(i64::from(line.quantity))
            .bind(line.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order_id)
    }

    /// Get an order with its items, only if it belongs to `user_id`.
    ///
    /// Ownership is enforced by the query predicate: a non-owner gets the
    /// same `None` as a nonexistent order, so existence never leaks.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_for_user(
        &self,
        order_id: OrderId,
        user_id: UserId,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, total_cents, customer_name, phone, address, status, created_at
            FROM orders
            WHERE id = ?1 AND user_id = ?2
            ",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = self.items_for(order_id).await?;

        Ok(Some(OrderWithItems { order, items }))
    }

    /// List every order newest-first, joined with items and purchaser identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_all(&self) -> Result<Vec<AdminOrder>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT o.id, o.user_id, o.total_cents, o.customer_name, o.phone, o.address,
                   o.status, o.created_at,
                   u.name AS purchaser_name, u.email AS purchaser_email
            FROM orders o
            JOIN users u ON u.id = o.user_id
            ORDER BY o.id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let item_rows = sqlx::query(
            r"
            SELECT order_id, product_id, quantity, unit_price_cents
            FROM order_items
            ORDER BY order_id ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
        for r in &item_rows {
            let order_id: OrderId = r.try_get("order_id")?;
            let item = OrderItem::from_row(r)?;
            items_by_order.entry(order_id).or_default().push(item);
        }

        let mut orders = Vec::with_capacity(rows.len());
        for r in &rows {
            let order = Order::from_row(r)?;
            let items = items_by_order.remove(&order.id).unwrap_or_default();
            orders.push(AdminOrder {
                purchaser_name: r.try_get("purchaser_name")?,
                purchaser_email: r.try_get("purchaser_email")?,
                order,
                items,
            });
        }

        Ok(orders)
    }

    /// Overwrite the status of a non-terminal order.
    ///
    /// The current status is read and the new one written inside one
    /// transaction, so two concurrent updates serialize and the terminal
    /// check cannot be bypassed by a race.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::NotFound` if the order doesn't exist.
    /// Returns `StatusError::Terminal` if the order is completed or cancelled.
    pub async fn set_status(
        &self,
        order_id: OrderId,
        new_status: OrderStatus,
    ) -> Result<(), StatusError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT status FROM orders WHERE id = ?1")
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Err(StatusError::NotFound);
        };

        let current: OrderStatus = row.try_get("status")?;
        if !current.can_transition_to(new_status) {
            return Err(StatusError::Terminal(current));
        }

        sqlx::query("UPDATE orders SET status = ?1 WHERE id = ?2")
            .bind(new_status)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Fetch the items for one order, in insertion order.
    async fn items_for(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r"
            SELECT product_id, quantity, unit_price_cents
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}
