//! Shared type definitions for the potion shop ledger backend.
//!
//! This crate is the single source of truth for types used across the
//! workspace. Wire types flow to `TypeScript` via `ts-rs` so a dashboard
//! can consume the same shapes the game server sends.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers
//! - [`enums`] -- Liquid colors and ledger transaction types
//! - [`structs`] -- Ml vectors, ledger entries, potion recipes, balances
//! - [`wire`] -- HTTP request/response payloads

pub mod enums;
pub mod ids;
pub mod structs;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use enums::{Color, TransactionType};
pub use ids::{CartId, LedgerEntryId, PotionTypeId};
pub use structs::{Balance, LedgerEntry, MlVector, PotionType};
pub use wire::{
    Barrel, BottlingRequest, CartCheckout, CartItemQuantity, CatalogItem, CheckoutSummary,
    Customer, GameTime, InventoryAudit, NewCart, OrderLineItem, PurchaseRequest, SearchPage,
    SearchSortColumn, SearchSortOrder,
};
