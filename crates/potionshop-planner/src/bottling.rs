//! Bottling planning.
//!
//! Recipes are visited in ascending potion type id. Each recipe bottles as
//! many units as its scarcest color allows, and the liquid it uses is gone
//! for the recipes after it.

use potionshop_types::{Balance, BottlingRequest, MlVector, PotionType};

/// Plan how many potions of each recipe to bottle from the ml on hand.
///
/// A recipe with an all-zero or negative composition is skipped. Only
/// recipes with a non-zero quantity appear in the result. The total ml
/// consumed never exceeds what `balance` holds, per color.
pub fn plan_bottling(recipes: &[PotionType], balance: &Balance) -> Vec<BottlingRequest> {
    let mut available = balance.ml.clamp_non_negative();

    let mut ordered: Vec<&PotionType> = recipes.iter().collect();
    ordered.sort_by_key(|recipe| recipe.id);

    let mut plan = Vec::new();
    for recipe in ordered {
        let composition = recipe.composition;
        if composition.is_zero() || composition.has_negative() {
            tracing::debug!(sku = %recipe.sku, "Skipping recipe with unusable composition");
            continue;
        }

        let units = max_units(composition, available);
        if units == 0 {
            continue;
        }

        let Some(used) = composition.checked_scale(units) else {
            continue;
        };
        let Some(remaining) = available.checked_sub(used) else {
            continue;
        };
        available = remaining;

        tracing::debug!(sku = %recipe.sku, units, "Planned bottling");
        plan.push(BottlingRequest {
            potion_type: composition,
            quantity: units,
        });
    }

    plan
}

/// Units of `composition` that fit in `available`: the minimum over
/// required colors of `available / required`.
fn max_units(composition: MlVector, available: MlVector) -> i64 {
    composition
        .iter()
        .filter(|(_, required)| *required > 0)
        .filter_map(|(color, required)| available.get(color).checked_div(required))
        .min()
        .unwrap_or(0)
}
