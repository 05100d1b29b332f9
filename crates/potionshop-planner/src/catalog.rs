//! Wholesale catalog resolution.
//!
//! The game server describes barrels by SKU string. Planning works on
//! [`BarrelOffer`]s whose color is already a [`Color`], resolved once
//! here. A SKU that names no color fails the whole catalog.

use potionshop_types::{Barrel, Color};

use crate::PlanError;

/// A barrel the wholesaler offers today, with its color resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarrelOffer {
    /// Wholesale SKU.
    pub sku: String,
    /// Liquid color in the barrel.
    pub color: Color,
    /// Milliliters per barrel.
    pub ml_per_barrel: i64,
    /// Gold per barrel.
    pub price: i64,
    /// Barrels available for sale.
    pub available: i64,
}

impl TryFrom<&Barrel> for BarrelOffer {
    type Error = PlanError;

    fn try_from(barrel: &Barrel) -> Result<Self, Self::Error> {
        let color = Color::from_sku(&barrel.sku).ok_or_else(|| PlanError::InvalidSku {
            sku: barrel.sku.clone(),
        })?;
        Ok(Self {
            sku: barrel.sku.clone(),
            color,
            ml_per_barrel: barrel.ml_per_barrel,
            price: barrel.price,
            available: barrel.quantity,
        })
    }
}

/// Resolve every catalog listing into an offer.
///
/// # Errors
///
/// Returns [`PlanError::InvalidSku`] for the first SKU that names no
/// color. No partial catalog is returned.
pub fn resolve_offers(catalog: &[Barrel]) -> Result<Vec<BarrelOffer>, PlanError> {
    catalog.iter().map(BarrelOffer::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use potionshop_types::MlVector;

    fn barrel(sku: &str) -> Barrel {
        Barrel {
            sku: sku.to_owned(),
            ml_per_barrel: 500,
            potion_type: MlVector::ZERO,
            price: 100,
            quantity: 3,
        }
    }

    #[test]
    fn resolves_colors_once() {
        let offers = resolve_offers(&[barrel("SMALL_RED_BARREL"), barrel("LARGE_DARK_BARREL")]);
        assert!(offers.is_ok());
        let colors: Vec<Color> = offers
            .unwrap_or_default()
            .into_iter()
            .map(|o| o.color)
            .collect();
        assert_eq!(colors, vec![Color::Red, Color::Dark]);
    }

    #[test]
    fn unknown_sku_fails_the_catalog() {
        let offers = resolve_offers(&[barrel("SMALL_RED_BARREL"), barrel("MYSTERY_BARREL")]);
        assert!(matches!(
            offers,
            Err(PlanError::InvalidSku { ref sku }) if sku == "MYSTERY_BARREL"
        ));
    }
}
