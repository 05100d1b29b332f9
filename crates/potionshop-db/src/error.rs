//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`], which wraps the underlying
//! [`sqlx`] errors together with the domain errors raised while building
//! ledger entries or plans inside a transaction. Any error returned from a
//! shop operation means its transaction was rolled back.

use potionshop_ledger::LedgerError;
use potionshop_planner::PlanError;
use potionshop_types::CartId;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A ledger entry could not be built.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A plan could not be computed.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// A stored row could not be mapped back to a domain type.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The cart does not exist (never created, checked out, or reset).
    #[error("cart {0} not found")]
    CartNotFound(CartId),

    /// No potion type has this SKU.
    #[error("unknown potion SKU: {0}")]
    UnknownSku(String),

    /// Checkout was requested for a cart with no items.
    #[error("cart {0} has no items")]
    EmptyCart(CartId),

    /// The shop holds fewer potions than a cart line asks for.
    #[error("insufficient stock for {sku}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Potion SKU.
        sku: String,
        /// Quantity in the cart.
        requested: i64,
        /// Quantity the ledger says is on hand.
        available: i64,
    },
}
