//! Request middleware: the access guard extractors and session layer.

pub mod auth;
pub mod session;

pub use auth::{
    OptionalAuth, RequireAdmin, RequireAuth, clear_current_user, set_current_user,
};
pub use session::create_session_layer;
