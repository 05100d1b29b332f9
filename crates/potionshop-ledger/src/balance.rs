//! Balance aggregation: current holdings as the sum of ledger deltas.
//!
//! Gold and liquid are always summed across every entry. Potion stock is
//! grouped by potion type, either for the whole catalog or for a single
//! type. An empty ledger aggregates to an all-zero [`Balance`].
//!
//! Negative results (e.g. from inconsistent history) are returned as-is.
//! Planners clamp them before use.

use potionshop_types::{Balance, LedgerEntry, PotionTypeId};

/// Which potion stock figures to include in an aggregated balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BalanceScope {
    /// Every potion type that appears in the ledger.
    #[default]
    All,
    /// A single potion type (present in the result even if never stocked).
    PotionType(PotionTypeId),
}

impl BalanceScope {
    /// The potion type filter, if scoped.
    pub const fn potion_type(self) -> Option<PotionTypeId> {
        match self {
            Self::All => None,
            Self::PotionType(id) => Some(id),
        }
    }

    const fn includes(self, id: PotionTypeId) -> bool {
        match self {
            Self::All => true,
            Self::PotionType(scoped) => scoped.0 == id.0,
        }
    }
}

/// Sum ledger entries into a [`Balance`].
///
/// Summation is exact integer arithmetic; it saturates at the `i64`
/// bounds instead of wrapping.
pub fn aggregate<'a, I>(entries: I, scope: BalanceScope) -> Balance
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    let mut balance = Balance::default();
    if let BalanceScope::PotionType(id) = scope {
        balance.potions.insert(id, 0);
    }

    for entry in entries {
        balance.gold = balance.gold.saturating_add(entry.gold_delta);
        for (color, delta) in entry.ml_delta.iter() {
            let current = balance.ml.get(color);
            balance.ml = balance.ml.with(color, current.saturating_add(delta));
        }

        if let Some(id) = entry.potion_type_id
            && scope.includes(id)
        {
            let qty = balance.potions.entry(id).or_insert(0);
            *qty = qty.saturating_add(entry.potion_quantity_delta);
        }
    }

    balance
}
