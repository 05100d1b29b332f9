//! HTTP API for the potion shop.
//!
//! This crate provides the Axum server the game server calls through the
//! day: barrel and bottling plans and deliveries, the public catalog,
//! carts and checkout, the inventory audit, and reset.
//!
//! # Architecture
//!
//! Handlers are thin. Each one extracts its path and JSON body, calls a
//! single [`Shop`](potionshop_db::Shop) operation (which owns the
//! transaction), and maps [`DbError`](potionshop_db::DbError) into an
//! HTTP status through [`ApiError`]:
//!
//! - unknown cart or potion SKU: 404
//! - empty cart, insufficient stock, unresolvable SKU or recipe: 400
//! - persistence failure: 500
//!
//! All routes except `GET /catalog/` require the `access_token` header.

pub mod auth;
pub mod carts;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
