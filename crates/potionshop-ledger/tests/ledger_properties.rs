//! Property-based tests for ledger aggregation.
//!
//! Random sequences of deltas are appended to a ledger and the derived
//! balance is compared against an independent field-wise sum.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use proptest::prelude::*;

use potionshop_ledger::{Ledger, RESET_GOLD, TransactionBuilder};
use potionshop_types::{MlVector, PotionTypeId, TransactionType};

/// One generated delta: (ml, gold, optional potion type with quantity).
type Delta = ([i64; 4], i64, Option<(i64, i64)>);

/// Keep magnitudes small enough that sums of a few hundred entries never
/// approach `i64` bounds.
fn delta_strategy() -> impl Strategy<Value = Delta> {
    (
        prop::array::uniform4(-10_000_i64..10_000),
        -10_000_i64..10_000,
        prop::option::of((1_i64..5, -50_i64..50)),
    )
}

fn build_ledger(deltas: &[Delta]) -> Ledger {
    let mut ledger = Ledger::new();
    for (ml, gold, potion) in deltas {
        let mut builder = TransactionBuilder::new(TransactionType::Adjustment)
            .ml(MlVector::from_array(*ml))
            .gold(*gold);
        if let Some((id, qty)) = potion {
            builder = builder.potion_type(PotionTypeId(*id)).potions(*qty);
        }
        // Empty deltas are rejected by the builder; skipping them keeps
        // the expected sum unchanged.
        if let Ok(entry) = builder.build() {
            ledger.append(entry);
        }
    }
    ledger
}

proptest! {
    /// The aggregated balance equals the exact sum of every field.
    #[test]
    fn balance_is_fieldwise_sum(deltas in prop::collection::vec(delta_strategy(), 0..200)) {
        let ledger = build_ledger(&deltas);
        let balance = ledger.balance();

        let gold: i64 = deltas.iter().map(|(_, g, _)| *g).sum();
        prop_assert_eq!(balance.gold, gold);

        for i in 0..4 {
            let expected: i64 = deltas.iter().map(|(ml, _, _)| ml[i]).sum();
            prop_assert_eq!(balance.ml.to_array()[i], expected);
        }

        for id in 1..5 {
            let expected: i64 = deltas
                .iter()
                .filter_map(|(_, _, p)| *p)
                .filter(|(pid, _)| *pid == id)
                .map(|(_, q)| q)
                .sum();
            prop_assert_eq!(balance.potion_quantity(PotionTypeId(id)), expected);
        }
    }

    /// Reading a balance twice gives the same answer.
    #[test]
    fn balance_read_is_idempotent(deltas in prop::collection::vec(delta_strategy(), 0..50)) {
        let ledger = build_ledger(&deltas);
        prop_assert_eq!(ledger.balance(), ledger.balance());
    }

    /// After any history, reset lands on the starting state, twice.
    #[test]
    fn reset_always_lands_on_starting_state(deltas in prop::collection::vec(delta_strategy(), 0..50)) {
        let mut ledger = build_ledger(&deltas);
        for _ in 0..2 {
            prop_assert!(ledger.reset().is_ok());
            let balance = ledger.balance();
            prop_assert_eq!(balance.gold, RESET_GOLD);
            prop_assert_eq!(balance.ml, MlVector::ZERO);
            prop_assert!(balance.potions.values().all(|q| *q == 0));
        }
    }
}
