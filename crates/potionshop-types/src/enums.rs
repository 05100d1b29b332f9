//! Enumeration types for the potion shop.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Liquid colors
// ---------------------------------------------------------------------------

/// One of the four raw liquid colors tracked in milliliters.
///
/// Barrel SKUs are resolved to a [`Color`] once, when the wholesale
/// catalog is loaded, instead of re-matching strings per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Color {
    /// Red liquid.
    Red,
    /// Green liquid.
    Green,
    /// Blue liquid.
    Blue,
    /// Dark liquid.
    Dark,
}

impl Color {
    /// All colors in canonical `[red, green, blue, dark]` order.
    pub const ALL: [Self; 4] = [Self::Red, Self::Green, Self::Blue, Self::Dark];

    /// Lowercase name, as it appears inside barrel SKUs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Dark => "dark",
        }
    }

    /// Resolve the color of a barrel from its SKU.
    ///
    /// Matching is a case-insensitive substring search in canonical
    /// color order, so `SMALL_RED_BARREL` and `mini_red_barrel` both
    /// resolve to [`Color::Red`]. Returns `None` if no color name
    /// appears in the SKU.
    pub fn from_sku(sku: &str) -> Option<Self> {
        let lower = sku.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| lower.contains(color.as_str()))
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Ledger transaction types
// ---------------------------------------------------------------------------

/// The category of an inventory ledger entry.
///
/// Stored as `TEXT` so new categories can be added without a schema
/// migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TransactionType {
    /// Raw barrels delivered by the wholesaler (ml in, gold out).
    Delivery,
    /// A customer checkout (potions out, gold in).
    Purchase,
    /// Potions brewed from raw liquid (ml out, potions in).
    Bottling,
    /// Compensating entry that returns the shop to its starting state.
    Reset,
    /// Manual correction or starting funds.
    Adjustment,
}

impl TransactionType {
    /// Database representation of this transaction type.
    pub const fn as_db_str(self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Purchase => "purchase",
            Self::Bottling => "bottling",
            Self::Reset => "reset",
            Self::Adjustment => "adjustment",
        }
    }

    /// Parse the database representation. Returns `None` for unknown tags.
    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "delivery" => Some(Self::Delivery),
            "purchase" => Some(Self::Purchase),
            "bottling" => Some(Self::Bottling),
            "reset" => Some(Self::Reset),
            "adjustment" => Some(Self::Adjustment),
            _ => None,
        }
    }
}

impl core::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_resolution_is_case_insensitive() {
        assert_eq!(Color::from_sku("SMALL_RED_BARREL"), Some(Color::Red));
        assert_eq!(Color::from_sku("medium_green_barrel"), Some(Color::Green));
        assert_eq!(Color::from_sku("LARGE_Blue_BARREL"), Some(Color::Blue));
        assert_eq!(Color::from_sku("MINI_DARK_BARREL"), Some(Color::Dark));
    }

    #[test]
    fn unknown_sku_has_no_color() {
        assert_eq!(Color::from_sku("SMALL_PURPLE_BARREL"), None);
        assert_eq!(Color::from_sku(""), None);
    }

    #[test]
    fn transaction_type_round_trips_through_db_string() {
        for kind in [
            TransactionType::Delivery,
            TransactionType::Purchase,
            TransactionType::Bottling,
            TransactionType::Reset,
            TransactionType::Adjustment,
        ] {
            assert_eq!(TransactionType::from_db_str(kind.as_db_str()), Some(kind));
        }
        assert_eq!(TransactionType::from_db_str("refund"), None);
    }
}
