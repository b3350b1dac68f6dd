//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps every failure in the order
//! core to an HTTP status and a safe JSON message. All route handlers return
//! `Result<T, AppError>`.
//!
//! The taxonomy follows the domain: validation errors are user-correctable
//! and change no state; authorization failures never reveal whether the
//! target exists; storage failures are never partially applied and surface
//! as generic retryable errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use ovenline_core::OrderStatus;

use crate::db::RepositoryError;
use crate::db::orders::StatusError;
use crate::services::auth::AuthError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Session store operation failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// The requested catalog product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// Checkout attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Checkout attempted with missing fulfillment fields.
    #[error("missing fulfillment details: {}", .0.join(", "))]
    InvalidFulfillmentDetails(Vec<&'static str>),

    /// The checkout transaction failed; nothing was written and the cart is
    /// preserved.
    #[error("checkout failed")]
    CheckoutFailed,

    /// Unrecognized order status value.
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    /// Status write rejected because the order is in a terminal state.
    #[error("order is already {current} and cannot change status")]
    InvalidTransition { current: OrderStatus },

    /// Resource not found (or not owned by the requester).
    #[error("not found")]
    NotFound,
}

impl From<StatusError> for AppError {
    fn from(e: StatusError) -> Self {
        match e {
            StatusError::NotFound => Self::NotFound,
            StatusError::Terminal(current) => Self::InvalidTransition { current },
            StatusError::Repository(e) => Self::Database(e),
        }
    }
}

impl AppError {
    const fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::CheckoutFailed => StatusCode::SERVICE_UNAVAILABLE,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::WeakPassword(_) | AuthError::InvalidEmail(_) | AuthError::EmptyName => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::EmptyCart | Self::InvalidFulfillmentDetails(_) | Self::InvalidStatus(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::ProductNotFound | Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// The message exposed to clients. Internal details stay in the logs.
    fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Session(_) => "Internal server error".to_string(),
            Self::CheckoutFailed => {
                "Checkout could not be completed; your cart is unchanged, please retry".to_string()
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::UserNotFound => {
                    "Invalid credentials".to_string()
                }
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists".to_string()
                }
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::EmptyName => "Name cannot be empty".to_string(),
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    "Internal server error".to_string()
                }
            },
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            Self::Database(_) | Self::Session(_) | Self::CheckoutFailed
        ) {
            tracing::error!(error = %self, "request error");
        }

        let status = self.status_code();
        let body = Json(json!({ "error": self.message() }));

        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
