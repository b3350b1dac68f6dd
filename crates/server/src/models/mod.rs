//! Domain models for the server.
//!
//! These types represent validated domain objects separate from raw database
//! rows, plus the small identity struct kept in the session.

pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use order::{AdminOrder, FulfillmentDetails, Order, OrderItem, OrderWithItems};
pub use product::Product;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
