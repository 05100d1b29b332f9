//! `PostgreSQL` persistence for the potion shop.
//!
//! The inventory ledger lives in the `inventory_ledger` table and is only
//! ever appended to. Balances are summed in SQL on every read; nothing
//! caches them. Recipes live in `potion_types`, open carts in `carts` and
//! `cart_items`.
//!
//! # Architecture
//!
//! ```text
//! HTTP handler
//!     |
//!     +-- Shop (one SERIALIZABLE transaction per operation)
//!         |-- LedgerStore   (append entries, sum balances)
//!         |-- PotionStore   (recipe lookups)
//!         +-- CartStore     (carts, lines, order search)
//! ```
//!
//! Stores borrow a connection, so several of them can share one open
//! transaction.
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` connection pool, configuration, and
//!   migrations
//! - [`ledger_store`] -- Ledger appends and balance aggregation
//! - [`potion_store`] -- Potion type lookups
//! - [`cart_store`] -- Carts, cart lines, and order search
//! - [`shop`] -- Transactional shop operations
//! - [`error`] -- Shared error types

pub mod cart_store;
pub mod error;
pub mod ledger_store;
pub mod postgres;
pub mod potion_store;
pub mod shop;

// Re-export primary types for convenience.
pub use cart_store::{CartItemRow, CartStore, OrderSearch, SEARCH_PAGE_SIZE};
pub use error::DbError;
pub use ledger_store::{LedgerRow, LedgerStore};
pub use postgres::{PostgresConfig, PostgresPool};
pub use potion_store::{PotionRow, PotionStore};
pub use shop::Shop;
