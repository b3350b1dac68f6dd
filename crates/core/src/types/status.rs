//! Order fulfillment status state machine.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fulfillment stage of an order.
///
/// `Pending` is the sole initial state. `Completed` and `Cancelled` are
/// terminal: once an order reaches either, no further status writes are
/// accepted. `Cancelled` is reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type), sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    OutForDelivery,
    Completed,
    Cancelled,
}

/// Error returned when a status string is not one of the recognized values.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid order status: {0}")]
pub struct InvalidStatus(pub String);

impl OrderStatus {
    /// All recognized statuses, in workflow order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Whether this status accepts no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether an order in this status may be moved to `next`.
    ///
    /// Staff may move a non-terminal order to any recognized status
    /// (including backwards, to correct mistakes); terminal orders reject
    /// every write.
    #[must_use]
    pub const fn can_transition_to(&self, _next: Self) -> bool {
        !self.is_terminal()
    }

    /// The stable token used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable label (e.g., "Out for Delivery").
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::OutForDelivery => "Out for Delivery",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(InvalidStatus(other.to_owned())),
        }
    }
}
