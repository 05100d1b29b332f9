//! The inventory ledger: an append-only log of signed deltas.
//!
//! The [`Ledger`] struct is the in-memory representation of the ledger.
//! It holds every [`LedgerEntry`] in append order and derives balances on
//! demand.
//!
//! # Design
//!
//! - **Append-only**: entries are never modified or deleted.
//! - **Derived state**: balances are recomputed from entries on every
//!   query, never cached.
//! - **Integers only**: every delta is an `i64`; no floating point.

use potionshop_types::{Balance, Barrel, Color, LedgerEntry, MlVector, PotionTypeId};

use crate::balance::{BalanceScope, aggregate};
use crate::reset::compensating_entries;
use crate::{LedgerError, transaction};

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The inventory ledger for one shop.
///
/// Every mutation (barrel delivery, bottling, customer purchase, reset)
/// appends one or more entries. The only read path is aggregation.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Create a new, empty ledger.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rebuild a ledger from previously recorded entries, in order.
    pub const fn from_entries(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    /// Number of entries recorded.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in append order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Append a pre-built entry.
    ///
    /// Entries built through [`crate::TransactionBuilder`] are already
    /// validated, so appending cannot fail.
    pub fn append(&mut self, entry: LedgerEntry) {
        tracing::trace!(
            id = %entry.id,
            transaction_type = %entry.transaction_type,
            "Ledger entry appended"
        );
        self.entries.push(entry);
    }

    /// Record raw liquid delivered: `ml` of `color` added, `cost` gold spent.
    pub fn record_delivery(&mut self, color: Color, ml: i64, cost: i64) -> Result<(), LedgerError> {
        let entry = transaction::delivery(color, ml, cost)?;
        self.append(entry);
        Ok(())
    }

    /// Record a delivered barrel line from the wholesaler.
    pub fn record_barrel_delivery(&mut self, barrel: &Barrel) -> Result<(), LedgerError> {
        let entry = transaction::barrel_delivery(barrel)?;
        self.append(entry);
        Ok(())
    }

    /// Record potions brewed from raw liquid.
    pub fn record_bottling(
        &mut self,
        potion_type_id: PotionTypeId,
        composition: MlVector,
        quantity: i64,
    ) -> Result<(), LedgerError> {
        let entry = transaction::bottling(potion_type_id, composition, quantity)?;
        self.append(entry);
        Ok(())
    }

    /// Record a customer purchase.
    pub fn record_purchase(
        &mut self,
        potion_type_id: PotionTypeId,
        quantity: i64,
        unit_price: i64,
    ) -> Result<(), LedgerError> {
        let entry = transaction::purchase(potion_type_id, quantity, unit_price)?;
        self.append(entry);
        Ok(())
    }

    /// Record a manual gold adjustment.
    pub fn record_adjustment(&mut self, gold: i64) -> Result<(), LedgerError> {
        let entry = transaction::adjustment(gold)?;
        self.append(entry);
        Ok(())
    }

    /// Append compensating entries that bring every balance back to the
    /// starting state. Returns the number of entries appended.
    pub fn reset(&mut self) -> Result<usize, LedgerError> {
        let entries = compensating_entries(&self.balance())?;
        let count = entries.len();
        self.entries.extend(entries);
        tracing::info!(appended = count, total = self.entries.len(), "Ledger reset");
        Ok(count)
    }

    /// Current gold, liquid, and stock of every potion type.
    pub fn balance(&self) -> Balance {
        aggregate(&self.entries, BalanceScope::All)
    }

    /// Current balance limited to the given scope.
    pub fn balance_for(&self, scope: BalanceScope) -> Balance {
        aggregate(&self.entries, scope)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RESET_GOLD;
    use potionshop_types::TransactionType;

    const GREEN_POTION: PotionTypeId = PotionTypeId(1);
    const RED_POTION: PotionTypeId = PotionTypeId(2);

    fn green_recipe() -> MlVector {
        MlVector::single(Color::Green, 100)
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert_eq!(ledger.balance(), Balance::default());
    }

    #[test]
    fn delivery_then_bottling_scenario() {
        let mut ledger = Ledger::new();
        assert!(ledger.record_delivery(Color::Green, 500, 0).is_ok());
        assert!(ledger.record_adjustment(1000).is_ok());
        assert!(ledger.record_bottling(GREEN_POTION, green_recipe(), 5).is_ok());

        let balance = ledger.balance();
        assert_eq!(balance.gold, 1000);
        assert_eq!(balance.ml.green, 0);
        assert_eq!(balance.potion_quantity(GREEN_POTION), 5);
    }

    #[test]
    fn purchase_moves_stock_into_gold() {
        let mut ledger = Ledger::new();
        assert!(ledger.record_bottling(RED_POTION, MlVector::single(Color::Red, 100), 3).is_ok());
        assert!(ledger.record_purchase(RED_POTION, 2, 50).is_ok());

        let balance = ledger.balance_for(BalanceScope::PotionType(RED_POTION));
        assert_eq!(balance.potion_quantity(RED_POTION), 1);
        assert_eq!(balance.gold, 100);
        assert_eq!(balance.ml.red, -300);
    }

    #[test]
    fn barrel_delivery_resolves_color_from_sku() {
        let mut ledger = Ledger::new();
        let barrel = Barrel {
            sku: "SMALL_DARK_BARREL".to_owned(),
            ml_per_barrel: 500,
            potion_type: MlVector::new(0, 0, 0, 1),
            price: 300,
            quantity: 1,
        };
        assert!(ledger.record_barrel_delivery(&barrel).is_ok());
        assert_eq!(ledger.balance().ml.dark, 500);
        assert_eq!(ledger.balance().gold, -300);
    }

    #[test]
    fn failed_record_appends_nothing() {
        let mut ledger = Ledger::new();
        let result = ledger.record_purchase(RED_POTION, 0, 50);
        assert!(result.is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn reset_preserves_history_and_zeroes_balances() {
        let mut ledger = Ledger::new();
        assert!(ledger.record_adjustment(900).is_ok());
        assert!(ledger.record_delivery(Color::Blue, 700, 120).is_ok());
        assert!(ledger.record_bottling(GREEN_POTION, green_recipe(), 2).is_ok());
        let before = ledger.len();

        let appended = ledger.reset().unwrap_or(0);
        assert_eq!(appended, 2);
        assert_eq!(ledger.len(), before.saturating_add(appended));

        let balance = ledger.balance();
        assert_eq!(balance.gold, RESET_GOLD);
        assert_eq!(balance.ml, MlVector::ZERO);
        assert_eq!(balance.total_potions(), 0);
        assert_eq!(balance.potion_quantity(GREEN_POTION), 0);
    }

    #[test]
    fn reset_twice_is_idempotent_in_effect() {
        let mut ledger = Ledger::new();
        assert!(ledger.record_delivery(Color::Red, 250, 75).is_ok());

        assert!(ledger.reset().is_ok());
        let first = ledger.balance();
        let len_after_first = ledger.len();

        assert!(ledger.reset().is_ok());
        let second = ledger.balance();

        assert_eq!(first.gold, RESET_GOLD);
        assert_eq!(first, second);
        // A second compensating entry is still appended.
        assert_eq!(ledger.len(), len_after_first.saturating_add(1));
        assert!(
            ledger
                .entries()
                .last()
                .is_some_and(|e| e.transaction_type == TransactionType::Reset)
        );
    }
}
