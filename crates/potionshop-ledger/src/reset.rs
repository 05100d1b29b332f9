//! Compensating entries that return the shop to its starting state.
//!
//! A reset never deletes history. Given the current unscoped balance it
//! produces entries tagged [`TransactionType::Reset`] whose deltas, added
//! to that balance, yield exactly [`RESET_GOLD`] gold, zero liquid, and
//! zero stock of every potion type:
//!
//! - one entry with no potion type carrying `RESET_GOLD - gold` and `-ml`,
//! - one entry per potion type with non-zero stock carrying `-quantity`.
//!
//! With no potions on hand this is a single entry. Splitting potion
//! stock per type keeps per-type balances at zero; the total potion delta
//! is still `-total_potions`.

use potionshop_types::{Balance, LedgerEntry, TransactionType};

use crate::{LedgerError, TransactionBuilder};

/// Gold the shop holds after a reset.
pub const RESET_GOLD: i64 = 100;

/// Build the compensating entries for `balance`.
///
/// # Errors
///
/// Returns [`LedgerError::Overflow`] if a balance is too large to negate.
pub fn compensating_entries(balance: &Balance) -> Result<Vec<LedgerEntry>, LedgerError> {
    let gold = RESET_GOLD
        .checked_sub(balance.gold)
        .ok_or(LedgerError::Overflow("reset gold"))?;
    let ml = balance
        .ml
        .checked_neg()
        .ok_or(LedgerError::Overflow("reset ml"))?;

    let mut entries = Vec::with_capacity(balance.potions.len().saturating_add(1));
    entries.push(
        TransactionBuilder::new(TransactionType::Reset)
            .gold(gold)
            .ml(ml)
            .build()?,
    );

    for (&id, &qty) in &balance.potions {
        if qty == 0 {
            continue;
        }
        let delta = qty
            .checked_neg()
            .ok_or(LedgerError::Overflow("reset potions"))?;
        entries.push(
            TransactionBuilder::new(TransactionType::Reset)
                .potion_type(id)
                .potions(delta)
                .build()?,
        );
    }

    tracing::debug!(
        entries = entries.len(),
        gold_delta = gold,
        potions = balance.total_potions(),
        "Computed reset entries"
    );

    Ok(entries)
}
