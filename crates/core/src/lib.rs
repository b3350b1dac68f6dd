//! Ovenline Core - Shared domain types library.
//!
//! This crate provides the domain model used across the Ovenline components:
//! - `server` - Customer-facing ordering site and admin endpoints
//! - `cli` - Command-line tools for migrations, seeding, and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. The session cart in particular lives here so it can be
//! tested without a session backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and the
//!   order status state machine
//! - [`cart`] - The per-session shopping cart aggregate

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLine};
pub use types::*;
