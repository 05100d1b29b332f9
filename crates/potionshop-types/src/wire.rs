//! Request and response payloads exchanged with the game server.
//!
//! Field names follow the game server's JSON contract exactly
//! (`ml_per_barrel`, `potion_type`, `line_item_total`, ...).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::CartId;
use crate::structs::MlVector;

// ---------------------------------------------------------------------------
// Barrels
// ---------------------------------------------------------------------------

/// A barrel listing in the wholesale catalog, or a delivered barrel line.
///
/// In the catalog `quantity` is how many barrels the wholesaler has for
/// sale; in a delivery it is how many were delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Barrel {
    /// Wholesale SKU, e.g. `SMALL_RED_BARREL`.
    pub sku: String,
    /// Milliliters in one barrel.
    pub ml_per_barrel: i64,
    /// Color fractions reported by the wholesaler.
    #[ts(as = "[i64; 4]")]
    pub potion_type: MlVector,
    /// Gold per barrel.
    pub price: i64,
    /// Number of barrels.
    pub quantity: i64,
}

/// One line of a barrel purchase plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PurchaseRequest {
    /// Wholesale SKU to buy.
    pub sku: String,
    /// Number of barrels.
    pub quantity: i64,
}

// ---------------------------------------------------------------------------
// Bottling
// ---------------------------------------------------------------------------

/// A batch of potions of one recipe: planned by the bottler, or reported
/// as delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BottlingRequest {
    /// Recipe composition (ml per unit).
    #[ts(as = "[i64; 4]")]
    pub potion_type: MlVector,
    /// Number of units.
    pub quantity: i64,
}

// ---------------------------------------------------------------------------
// Catalog and audit
// ---------------------------------------------------------------------------

/// A potion offered for sale to customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CatalogItem {
    /// Potion SKU.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Units in stock.
    pub quantity: i64,
    /// Price in gold per unit.
    pub price: i64,
    /// Recipe composition.
    #[ts(as = "[i64; 4]")]
    pub potion_type: MlVector,
}

/// Aggregate holdings reported by `GET /inventory/audit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InventoryAudit {
    /// Potion units across all types.
    pub potions: i64,
    /// Raw liquid across all colors.
    pub ml_in_barrels: i64,
    /// Gold on hand.
    pub gold: i64,
}

// ---------------------------------------------------------------------------
// Carts
// ---------------------------------------------------------------------------

/// A customer visiting the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Customer {
    /// Customer display name.
    pub customer_name: String,
    /// Character class, e.g. `Wizard`.
    pub character_class: String,
    /// Character level.
    pub level: i32,
}

/// Response body of `POST /carts/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NewCart {
    /// The created cart.
    pub cart_id: CartId,
}

/// Request body of `POST /carts/{cart_id}/items/{item_sku}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CartItemQuantity {
    /// Units to add to the cart line.
    pub quantity: i64,
}

/// Request body of `POST /carts/{cart_id}/checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CartCheckout {
    /// Free-form payment description.
    pub payment: String,
}

/// Response body of a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CheckoutSummary {
    /// Potion units sold.
    pub total_potions_bought: i64,
    /// Gold received.
    pub total_gold_paid: i64,
}

// ---------------------------------------------------------------------------
// Order search
// ---------------------------------------------------------------------------

/// Column used to sort order search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SearchSortColumn {
    /// Customer name.
    CustomerName,
    /// Potion SKU.
    ItemSku,
    /// Line total in gold.
    LineItemTotal,
    /// Cart creation time.
    #[default]
    Timestamp,
}

/// Sort direction for order search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SearchSortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

/// One cart line returned by the order search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OrderLineItem {
    /// Position of this line in the overall result set.
    pub line_item_id: i64,
    /// Potion SKU.
    pub item_sku: String,
    /// Customer name.
    pub customer_name: String,
    /// Line total in gold.
    pub line_item_total: i64,
    /// Cart creation time (RFC 3339).
    pub timestamp: String,
}

/// One page of order search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SearchPage {
    /// Page number of the previous page, if any.
    pub previous: Option<i64>,
    /// Page number of the next page, if any.
    pub next: Option<i64>,
    /// Lines on this page.
    pub results: Vec<OrderLineItem>,
}

// ---------------------------------------------------------------------------
// Game clock
// ---------------------------------------------------------------------------

/// In-game time shared by the game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameTime {
    /// Day name, e.g. `Edgeday`.
    pub day: String,
    /// Hour of day (0-23).
    pub hour: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barrel_matches_game_server_json() {
        let json = r#"{
            "sku": "SMALL_RED_BARREL",
            "ml_per_barrel": 500,
            "potion_type": [1, 0, 0, 0],
            "price": 100,
            "quantity": 10
        }"#;
        let barrel: Option<Barrel> = serde_json::from_str(json).ok();
        assert!(barrel.is_some());
        if let Some(b) = barrel {
            assert_eq!(b.sku, "SMALL_RED_BARREL");
            assert_eq!(b.potion_type, MlVector::new(1, 0, 0, 0));
            assert_eq!(b.quantity, 10);
        }
    }

    #[test]
    fn sort_options_use_snake_case() {
        let col: Option<SearchSortColumn> = serde_json::from_str("\"line_item_total\"").ok();
        assert_eq!(col, Some(SearchSortColumn::LineItemTotal));
        assert_eq!(SearchSortColumn::default(), SearchSortColumn::Timestamp);
        assert_eq!(SearchSortOrder::default(), SearchSortOrder::Desc);
    }
}
