//! Barrel purchase planning.
//!
//! Offers are considered cheapest first, so a fixed gold budget buys as
//! many barrels as possible. For each offer the planner buys one barrel
//! at a time while all three hold:
//!
//! - the remaining gold covers the price,
//! - the color's running ml level is still below its target,
//! - the wholesaler still has barrels of that SKU.
//!
//! Gold and ml levels are tracked in memory only, so a later offer of the
//! same color sees the barrels already planned for it.

use potionshop_types::{Balance, Barrel, PurchaseRequest};

use crate::catalog::{BarrelOffer, resolve_offers};
use crate::policy::TargetPolicy;
use crate::PlanError;

/// Resolve the wholesale catalog and plan purchases against `balance`.
///
/// # Errors
///
/// Returns [`PlanError::InvalidSku`] if any listing names no color; no
/// plan is produced in that case.
pub fn plan_barrels(
    catalog: &[Barrel],
    balance: &Balance,
    policy: TargetPolicy,
) -> Result<Vec<PurchaseRequest>, PlanError> {
    let offers = resolve_offers(catalog)?;
    Ok(plan_purchases(&offers, balance, policy))
}

/// Plan barrel purchases from already-resolved offers.
///
/// Only offers with a non-zero planned quantity appear in the result, in
/// the order they were considered (ascending price, ties in catalog
/// order). The summed cost never exceeds the starting gold.
pub fn plan_purchases(
    offers: &[BarrelOffer],
    balance: &Balance,
    policy: TargetPolicy,
) -> Vec<PurchaseRequest> {
    let mut levels = balance.ml.clamp_non_negative();
    let targets = policy.targets(levels);
    let mut gold = balance.gold.max(0);

    let mut by_price: Vec<&BarrelOffer> = offers.iter().collect();
    by_price.sort_by_key(|offer| offer.price);

    let mut plan = Vec::new();
    for offer in by_price {
        if offer.price < 0 || offer.ml_per_barrel <= 0 {
            tracing::warn!(
                sku = %offer.sku,
                price = offer.price,
                ml_per_barrel = offer.ml_per_barrel,
                "Skipping malformed barrel offer"
            );
            continue;
        }

        let target = targets.get(offer.color);
        let mut quantity: i64 = 0;
        while quantity < offer.available
            && gold >= offer.price
            && levels.get(offer.color) < target
        {
            gold = gold.saturating_sub(offer.price);
            let level = levels.get(offer.color).saturating_add(offer.ml_per_barrel);
            levels = levels.with(offer.color, level);
            quantity = quantity.saturating_add(1);
        }

        if quantity > 0 {
            tracing::debug!(
                sku = %offer.sku,
                color = %offer.color,
                quantity,
                gold_left = gold,
                "Planned barrel purchase"
            );
            plan.push(PurchaseRequest {
                sku: offer.sku.clone(),
                quantity,
            });
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use potionshop_types::{Color, MlVector};

    fn offer(sku: &str, color: Color, ml: i64, price: i64, available: i64) -> BarrelOffer {
        BarrelOffer {
            sku: sku.to_owned(),
            color,
            ml_per_barrel: ml,
            price,
            available,
        }
    }

    fn balance(gold: i64, ml: MlVector) -> Balance {
        Balance {
            gold,
            ml,
            ..Balance::default()
        }
    }

    fn cost(plan: &[PurchaseRequest], offers: &[BarrelOffer]) -> i64 {
        plan.iter()
            .filter_map(|req| {
                offers
                    .iter()
                    .find(|o| o.sku == req.sku)
                    .map(|o| o.price.saturating_mul(req.quantity))
            })
            .fold(0, i64::saturating_add)
    }

    #[test]
    fn cheapest_offer_is_considered_first() {
        let offers = [
            offer("SMALL_GREEN_BARREL", Color::Green, 500, 200, 10),
            offer("SMALL_RED_BARREL", Color::Red, 500, 100, 10),
        ];
        let plan = plan_purchases(
            &offers,
            &balance(500, MlVector::ZERO),
            TargetPolicy::Fixed { threshold: 100 },
        );

        assert_eq!(
            plan,
            vec![
                PurchaseRequest {
                    sku: "SMALL_RED_BARREL".to_owned(),
                    quantity: 1,
                },
                PurchaseRequest {
                    sku: "SMALL_GREEN_BARREL".to_owned(),
                    quantity: 1,
                },
            ]
        );
        assert_eq!(cost(&plan, &offers), 300);
    }

    #[test]
    fn buys_until_target_reached() {
        let offers = [offer("MINI_BLUE_BARREL", Color::Blue, 200, 60, 10)];
        let plan = plan_purchases(
            &offers,
            &balance(1000, MlVector::new(0, 0, 100, 0)),
            TargetPolicy::Fixed { threshold: 700 },
        );
        // 100 -> 300 -> 500 -> 700: three barrels.
        assert_eq!(plan.first().map(|r| r.quantity), Some(3));
    }

    #[test]
    fn gold_budget_is_never_exceeded() {
        let offers = [
            offer("SMALL_RED_BARREL", Color::Red, 100, 70, 10),
            offer("SMALL_GREEN_BARREL", Color::Green, 100, 70, 10),
            offer("SMALL_BLUE_BARREL", Color::Blue, 100, 70, 10),
        ];
        let start = balance(200, MlVector::ZERO);
        let plan = plan_purchases(&offers, &start, TargetPolicy::Fixed { threshold: 10_000 });
        assert!(cost(&plan, &offers) <= start.gold);
        assert_eq!(cost(&plan, &offers), 140);
    }

    #[test]
    fn later_offers_see_earlier_purchases_of_the_same_color() {
        let offers = [
            offer("SMALL_RED_BARREL", Color::Red, 500, 100, 10),
            offer("MEDIUM_RED_BARREL", Color::Red, 2500, 250, 10),
        ];
        let plan = plan_purchases(
            &offers,
            &balance(10_000, MlVector::ZERO),
            TargetPolicy::Fixed { threshold: 400 },
        );
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.first().map(|r| r.sku.as_str()), Some("SMALL_RED_BARREL"));
    }

    #[test]
    fn availability_caps_quantity() {
        let offers = [offer("SMALL_DARK_BARREL", Color::Dark, 100, 10, 2)];
        let plan = plan_purchases(
            &offers,
            &balance(1000, MlVector::ZERO),
            TargetPolicy::Fixed { threshold: 5000 },
        );
        assert_eq!(plan.first().map(|r| r.quantity), Some(2));
    }

    #[test]
    fn negative_balances_are_clamped_to_zero() {
        let offers = [offer("SMALL_RED_BARREL", Color::Red, 500, 0, 1)];
        let plan = plan_purchases(
            &offers,
            &balance(-50, MlVector::new(-10, 0, 0, 0)),
            TargetPolicy::default(),
        );
        // A free barrel is still affordable with clamped gold.
        assert_eq!(plan.first().map(|r| r.quantity), Some(1));

        let priced = [offer("SMALL_RED_BARREL", Color::Red, 500, 1, 1)];
        let plan = plan_purchases(&priced, &balance(-50, MlVector::ZERO), TargetPolicy::default());
        assert!(plan.is_empty());
    }

    #[test]
    fn malformed_offers_are_skipped() {
        let offers = [
            offer("SMALL_RED_BARREL", Color::Red, 0, 10, 5),
            offer("SMALL_GREEN_BARREL", Color::Green, 100, -5, 5),
        ];
        let plan = plan_purchases(&offers, &balance(100, MlVector::ZERO), TargetPolicy::default());
        assert!(plan.is_empty());
    }

    #[test]
    fn equalize_buys_the_lagging_colors() {
        let offers = [
            offer("SMALL_RED_BARREL", Color::Red, 500, 100, 10),
            offer("SMALL_GREEN_BARREL", Color::Green, 500, 100, 10),
        ];
        // Mean of (2000, 0, 0, 0) is 500: red is at target, green is not.
        let plan = plan_purchases(
            &offers,
            &balance(1000, MlVector::new(2000, 0, 0, 0)),
            TargetPolicy::default(),
        );
        assert_eq!(
            plan,
            vec![PurchaseRequest {
                sku: "SMALL_GREEN_BARREL".to_owned(),
                quantity: 1,
            }]
        );
    }

    #[test]
    fn plan_barrels_rejects_unknown_sku() {
        let catalog = [Barrel {
            sku: "SMALL_TEAL_BARREL".to_owned(),
            ml_per_barrel: 500,
            potion_type: MlVector::ZERO,
            price: 100,
            quantity: 1,
        }];
        let result = plan_barrels(&catalog, &balance(1000, MlVector::ZERO), TargetPolicy::default());
        assert!(matches!(result, Err(PlanError::InvalidSku { .. })));
    }
}
