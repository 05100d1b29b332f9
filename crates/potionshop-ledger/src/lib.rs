//! Append-only inventory ledger for the potion shop.
//!
//! Every change to gold, raw liquid, or potion stock is recorded as a
//! [`LedgerEntry`] of signed deltas. Nothing is ever updated in place:
//! current holdings are derived by summing entries, and even a reset is
//! expressed as compensating entries so the full history survives.
//!
//! # Architecture
//!
//! - [`ledger`] -- The in-memory [`Ledger`]: append-only log with recording
//!   methods.
//! - [`transaction`] -- The [`TransactionBuilder`] for validated entry
//!   construction, plus constructors for each business event.
//! - [`balance`] -- Aggregation of entries into a [`Balance`].
//! - [`reset`] -- Compensating entries that return the shop to its
//!   starting state.
//!
//! The `PostgreSQL` ledger in `potionshop-db` uses the same builders and
//! reset computation; only the summation moves into SQL.
//!
//! # Usage
//!
//! ```
//! use potionshop_ledger::Ledger;
//! use potionshop_types::{Color, PotionTypeId, MlVector};
//!
//! let mut ledger = Ledger::new();
//! ledger.record_delivery(Color::Green, 500, 100).ok();
//! ledger.record_bottling(PotionTypeId(1), MlVector::single(Color::Green, 100), 5).ok();
//!
//! let balance = ledger.balance();
//! assert_eq!(balance.gold, -100);
//! assert_eq!(balance.ml.green, 0);
//! assert_eq!(balance.potion_quantity(PotionTypeId(1)), 5);
//! ```
//!
//! [`LedgerEntry`]: potionshop_types::LedgerEntry
//! [`Balance`]: potionshop_types::Balance

pub mod balance;
pub mod ledger;
pub mod reset;
pub mod transaction;

// Re-export primary types at crate root.
pub use balance::{BalanceScope, aggregate};
pub use ledger::Ledger;
pub use reset::{RESET_GOLD, compensating_entries};
pub use transaction::TransactionBuilder;

use potionshop_types::{MlVector, TransactionType};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when constructing or recording ledger entries.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A barrel SKU could not be mapped to a liquid color.
    #[error("invalid SKU: {sku} does not name a known color")]
    InvalidSku {
        /// The offending SKU.
        sku: String,
    },

    /// A potion composition does not match any defined potion type.
    #[error("invalid potion type: {composition:?} matches no known recipe")]
    UnknownComposition {
        /// The offending composition.
        composition: MlVector,
    },

    /// An entry changes potion stock without naming the potion type.
    #[error("{transaction_type} entry changes potion stock without a potion type")]
    MissingPotionType {
        /// The entry type being built.
        transaction_type: TransactionType,
    },

    /// An entry carries no deltas at all.
    #[error("{transaction_type} entry has no effect")]
    EmptyEntry {
        /// The entry type being built.
        transaction_type: TransactionType,
    },

    /// A quantity that must be positive was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Name of the field.
        field: &'static str,
        /// The invalid value.
        value: i64,
    },

    /// A delta computation overflowed `i64`.
    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),
}
