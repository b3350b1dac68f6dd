//! The per-session shopping cart aggregate.
//!
//! A cart is ephemeral: it lives in the session store, is never written to
//! durable storage, and is lost when the session expires. The checkout
//! transaction consumes a cart snapshot and clears the cart on success.
//!
//! Invariant: `total_amount` and `total_quantity` always equal the fold over
//! the current lines. Every mutation recomputes the totals from scratch so
//! they can never drift incrementally.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// One line in a cart: a product with its quantity.
///
/// The unit price and display name are snapshotted from the catalog when the
/// line is first added, so a later catalog price change does not retroactively
/// alter an open cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The catalog product this line refers to.
    pub product_id: ProductId,
    /// Product name at add-time.
    pub name: String,
    /// Unit price at add-time, in cents.
    pub unit_price: Price,
    /// Number of units, always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// The line total: unit price times quantity.
    #[must_use]
    pub fn line_amount(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// A session-scoped cart: unique product lines plus derived totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    total_amount: Price,
    total_quantity: u32,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// If the product is already present its quantity is incremented and the
    /// original price/name snapshot is kept; otherwise a new line is inserted
    /// with the supplied snapshot. A zero quantity is clamped to 1, matching
    /// the documented coercion at the request boundary.
    pub fn add_item(&mut self, product_id: ProductId, name: &str, unit_price: Price, quantity: u32) {
        let quantity = quantity.max(1);
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product_id,
                name: name.to_owned(),
                unit_price,
                quantity,
            }),
        }
        self.recompute();
    }

    /// Remove the line for a product.
    ///
    /// Removing a product that is not in the cart is a no-op, not an error.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
        self.recompute();
    }

    /// Reset to the empty cart. Used by checkout after a successful commit.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub const fn total_amount(&self) -> Price {
        self.total_amount
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub const fn total_quantity(&self) -> u32 {
        self.total_quantity
    }

    /// Whether the cart holds no units.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_quantity == 0
    }

    /// Recompute both totals as a fold over the current lines.
    fn recompute(&mut self) {
        self.total_amount = self.lines.iter().map(CartLine::line_amount).sum();
        self.total_quantity = self
            .lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity));
    }
}
