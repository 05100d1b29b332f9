//! Core entity structs: the ml vector, ledger entries, potion recipes,
//! and the derived balance snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Color, TransactionType};
use crate::ids::{LedgerEntryId, PotionTypeId};

// ---------------------------------------------------------------------------
// MlVector
// ---------------------------------------------------------------------------

/// Milliliters of each liquid color.
///
/// Used both for signed ledger deltas and for recipe compositions. On the
/// wire it is the four-element array `[red, green, blue, dark]` the game
/// server sends as `potion_type`.
///
/// All arithmetic is checked: an overflowing operation returns `None`
/// rather than wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i64; 4]", into = "[i64; 4]")]
pub struct MlVector {
    /// Red milliliters.
    pub red: i64,
    /// Green milliliters.
    pub green: i64,
    /// Blue milliliters.
    pub blue: i64,
    /// Dark milliliters.
    pub dark: i64,
}

impl MlVector {
    /// The all-zero vector.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Build a vector from its four components.
    pub const fn new(red: i64, green: i64, blue: i64, dark: i64) -> Self {
        Self {
            red,
            green,
            blue,
            dark,
        }
    }

    /// Build a vector from a `[red, green, blue, dark]` array.
    pub const fn from_array(values: [i64; 4]) -> Self {
        let [red, green, blue, dark] = values;
        Self::new(red, green, blue, dark)
    }

    /// Return the components as a `[red, green, blue, dark]` array.
    pub const fn to_array(self) -> [i64; 4] {
        [self.red, self.green, self.blue, self.dark]
    }

    /// A vector with `amount` in one color and zero elsewhere.
    pub const fn single(color: Color, amount: i64) -> Self {
        Self::ZERO.with(color, amount)
    }

    /// The milliliters of one color.
    pub const fn get(self, color: Color) -> i64 {
        match color {
            Color::Red => self.red,
            Color::Green => self.green,
            Color::Blue => self.blue,
            Color::Dark => self.dark,
        }
    }

    /// Return a copy with one color replaced.
    #[must_use]
    pub const fn with(mut self, color: Color, value: i64) -> Self {
        match color {
            Color::Red => self.red = value,
            Color::Green => self.green = value,
            Color::Blue => self.blue = value,
            Color::Dark => self.dark = value,
        }
        self
    }

    /// Iterate `(color, ml)` pairs in canonical order.
    pub fn iter(self) -> impl Iterator<Item = (Color, i64)> {
        Color::ALL.into_iter().map(move |color| (color, self.get(color)))
    }

    /// Component-wise checked addition.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self::new(
            self.red.checked_add(other.red)?,
            self.green.checked_add(other.green)?,
            self.blue.checked_add(other.blue)?,
            self.dark.checked_add(other.dark)?,
        ))
    }

    /// Component-wise checked subtraction.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        Some(Self::new(
            self.red.checked_sub(other.red)?,
            self.green.checked_sub(other.green)?,
            self.blue.checked_sub(other.blue)?,
            self.dark.checked_sub(other.dark)?,
        ))
    }

    /// Multiply every component by `factor`.
    pub fn checked_scale(self, factor: i64) -> Option<Self> {
        Some(Self::new(
            self.red.checked_mul(factor)?,
            self.green.checked_mul(factor)?,
            self.blue.checked_mul(factor)?,
            self.dark.checked_mul(factor)?,
        ))
    }

    /// Negate every component.
    pub fn checked_neg(self) -> Option<Self> {
        Some(Self::new(
            self.red.checked_neg()?,
            self.green.checked_neg()?,
            self.blue.checked_neg()?,
            self.dark.checked_neg()?,
        ))
    }

    /// Replace negative components with zero.
    #[must_use]
    pub const fn clamp_non_negative(self) -> Self {
        Self::new(
            if self.red < 0 { 0 } else { self.red },
            if self.green < 0 { 0 } else { self.green },
            if self.blue < 0 { 0 } else { self.blue },
            if self.dark < 0 { 0 } else { self.dark },
        )
    }

    /// Sum of all four components, saturating at the `i64` bounds.
    pub const fn total(self) -> i64 {
        self.red
            .saturating_add(self.green)
            .saturating_add(self.blue)
            .saturating_add(self.dark)
    }

    /// Returns `true` if every component is zero.
    pub const fn is_zero(self) -> bool {
        self.red == 0 && self.green == 0 && self.blue == 0 && self.dark == 0
    }

    /// Returns `true` if any component is negative.
    pub const fn has_negative(self) -> bool {
        self.red < 0 || self.green < 0 || self.blue < 0 || self.dark < 0
    }
}

impl From<[i64; 4]> for MlVector {
    fn from(values: [i64; 4]) -> Self {
        Self::from_array(values)
    }
}

impl From<MlVector> for [i64; 4] {
    fn from(ml: MlVector) -> Self {
        ml.to_array()
    }
}

// ---------------------------------------------------------------------------
// Ledger entry
// ---------------------------------------------------------------------------

/// A single immutable fact in the inventory ledger.
///
/// Every change to gold, liquid, or potion stock is recorded as one or
/// more entries of signed deltas. Current balances are never stored; they
/// are the sum of all entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LedgerEntry {
    /// Unique entry identifier.
    pub id: LedgerEntryId,
    /// What kind of event produced this entry.
    pub transaction_type: TransactionType,
    /// The potion type whose stock changed, if any.
    pub potion_type_id: Option<PotionTypeId>,
    /// Milliliters added (positive) or consumed (negative), per color.
    #[ts(as = "[i64; 4]")]
    pub ml_delta: MlVector,
    /// Gold earned (positive) or spent (negative).
    pub gold_delta: i64,
    /// Potion units produced (positive) or sold (negative).
    pub potion_quantity_delta: i64,
    /// Real-world timestamp.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Potion type (recipe)
// ---------------------------------------------------------------------------

/// A sellable potion and the recipe used to brew one unit of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PotionType {
    /// Database key.
    pub id: PotionTypeId,
    /// Stable external identifier, e.g. `GREEN_POTION_0`.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Price in gold per unit.
    pub price: i64,
    /// Milliliters of each color consumed to brew one unit.
    #[ts(as = "[i64; 4]")]
    pub composition: MlVector,
}

// ---------------------------------------------------------------------------
// Balance (derived)
// ---------------------------------------------------------------------------

/// Current holdings derived by summing ledger entries.
///
/// A balance is a snapshot: any append to the ledger invalidates it, so
/// it is recomputed per request and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Gold on hand.
    pub gold: i64,
    /// Raw liquid on hand, per color.
    pub ml: MlVector,
    /// Potion units on hand, per potion type.
    pub potions: BTreeMap<PotionTypeId, i64>,
}

impl Balance {
    /// Units held of one potion type (zero if never stocked).
    pub fn potion_quantity(&self, id: PotionTypeId) -> i64 {
        self.potions.get(&id).copied().unwrap_or(0)
    }

    /// Units held across all potion types.
    pub fn total_potions(&self) -> i64 {
        self.potions
            .values()
            .fold(0_i64, |acc, qty| acc.saturating_add(*qty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ml_vector_serializes_as_array() {
        let ml = MlVector::new(1, 2, 3, 4);
        let json = serde_json::to_string(&ml).ok();
        assert_eq!(json.as_deref(), Some("[1,2,3,4]"));

        let back: Option<MlVector> = serde_json::from_str("[0,100,0,0]").ok();
        assert_eq!(back, Some(MlVector::single(Color::Green, 100)));
    }

    #[test]
    fn ml_vector_arithmetic_is_checked() {
        let a = MlVector::new(10, 20, 30, 40);
        let b = MlVector::new(1, 2, 3, 4);
        assert_eq!(a.checked_add(b), Some(MlVector::new(11, 22, 33, 44)));
        assert_eq!(a.checked_sub(b), Some(MlVector::new(9, 18, 27, 36)));
        assert_eq!(b.checked_scale(3), Some(MlVector::new(3, 6, 9, 12)));
        assert_eq!(b.checked_neg(), Some(MlVector::new(-1, -2, -3, -4)));

        let huge = MlVector::single(Color::Dark, i64::MAX);
        assert_eq!(huge.checked_add(b), None);
        assert_eq!(huge.checked_scale(2), None);
    }

    #[test]
    fn clamp_replaces_only_negative_components() {
        let ml = MlVector::new(-5, 10, 0, -1);
        assert_eq!(ml.clamp_non_negative(), MlVector::new(0, 10, 0, 0));
        assert!(ml.has_negative());
        assert!(!ml.clamp_non_negative().has_negative());
    }

    #[test]
    fn with_and_get_address_the_same_color() {
        for color in Color::ALL {
            let ml = MlVector::ZERO.with(color, 7);
            assert_eq!(ml.get(color), 7);
            assert_eq!(ml.total(), 7);
        }
    }

    #[test]
    fn balance_totals_potions_across_types() {
        let mut balance = Balance::default();
        balance.potions.insert(PotionTypeId(1), 3);
        balance.potions.insert(PotionTypeId(2), 4);
        assert_eq!(balance.total_potions(), 7);
        assert_eq!(balance.potion_quantity(PotionTypeId(2)), 4);
        assert_eq!(balance.potion_quantity(PotionTypeId(9)), 0);
    }
}
