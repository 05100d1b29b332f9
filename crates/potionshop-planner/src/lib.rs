//! Daily planners for the potion shop.
//!
//! Both planners are synchronous pure functions over a [`Balance`]
//! snapshot. They never touch the ledger: the plans they return are
//! realized later, when the game server delivers barrels or bottles and
//! those deliveries are appended to the ledger.
//!
//! - [`catalog`] -- Resolves the wholesale catalog into typed
//!   [`BarrelOffer`]s, once, before planning.
//! - [`policy`] -- Per-color ml targets ([`TargetPolicy`]).
//! - [`purchase`] -- Greedy barrel purchase plan under a gold budget.
//! - [`bottling`] -- Limiting-ingredient bottling plan.
//!
//! Negative balances (possible only from inconsistent history) are
//! clamped to zero before planning.
//!
//! [`Balance`]: potionshop_types::Balance

pub mod bottling;
pub mod catalog;
pub mod policy;
pub mod purchase;

pub use bottling::plan_bottling;
pub use catalog::{BarrelOffer, resolve_offers};
pub use policy::TargetPolicy;
pub use purchase::{plan_barrels, plan_purchases};

/// Errors that can occur while planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// A barrel SKU could not be mapped to a liquid color.
    #[error("invalid SKU: {sku} does not name a known color")]
    InvalidSku {
        /// The offending SKU.
        sku: String,
    },
}
