//! Transaction builders and validation for the inventory ledger.
//!
//! [`TransactionBuilder`] is the only way to produce a [`LedgerEntry`].
//! The free functions below build the entry for each business event
//! (barrel delivery, bottling, customer purchase, adjustment) with
//! checked arithmetic, so a caller never hand-assembles signed deltas.

use chrono::Utc;

use potionshop_types::{
    Barrel, Color, LedgerEntry, LedgerEntryId, MlVector, PotionTypeId, TransactionType,
};

use crate::LedgerError;

// ---------------------------------------------------------------------------
// Transaction builder
// ---------------------------------------------------------------------------

/// Builder for constructing validated [`LedgerEntry`] values.
///
/// Enforces that an entry changing potion stock names its potion type, and
/// that every entry except a reset carries at least one non-zero delta.
///
/// # Examples
///
/// ```
/// use potionshop_ledger::TransactionBuilder;
/// use potionshop_types::{Color, MlVector, TransactionType};
///
/// let entry = TransactionBuilder::new(TransactionType::Delivery)
///     .ml(MlVector::single(Color::Red, 500))
///     .gold(-100)
///     .build();
///
/// assert!(entry.is_ok());
/// ```
#[derive(Debug)]
pub struct TransactionBuilder {
    transaction_type: TransactionType,
    potion_type_id: Option<PotionTypeId>,
    ml_delta: MlVector,
    gold_delta: i64,
    potion_quantity_delta: i64,
}

impl TransactionBuilder {
    /// Start building an entry of the given type with all deltas zero.
    pub const fn new(transaction_type: TransactionType) -> Self {
        Self {
            transaction_type,
            potion_type_id: None,
            ml_delta: MlVector::ZERO,
            gold_delta: 0,
            potion_quantity_delta: 0,
        }
    }

    /// Attach the potion type whose stock this entry changes.
    #[must_use]
    pub const fn potion_type(mut self, id: PotionTypeId) -> Self {
        self.potion_type_id = Some(id);
        self
    }

    /// Set the signed ml delta.
    #[must_use]
    pub const fn ml(mut self, delta: MlVector) -> Self {
        self.ml_delta = delta;
        self
    }

    /// Set the signed gold delta.
    #[must_use]
    pub const fn gold(mut self, delta: i64) -> Self {
        self.gold_delta = delta;
        self
    }

    /// Set the signed potion quantity delta.
    #[must_use]
    pub const fn potions(mut self, delta: i64) -> Self {
        self.potion_quantity_delta = delta;
        self
    }

    /// Validate inputs and produce a [`LedgerEntry`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingPotionType`] if the potion delta is
    /// non-zero but no potion type is set.
    /// Returns [`LedgerError::EmptyEntry`] if every delta is zero and the
    /// entry is not a reset. A reset of an already-clean shop still
    /// records that the reset happened.
    pub fn build(self) -> Result<LedgerEntry, LedgerError> {
        if self.potion_quantity_delta != 0 && self.potion_type_id.is_none() {
            return Err(LedgerError::MissingPotionType {
                transaction_type: self.transaction_type,
            });
        }

        let empty =
            self.ml_delta.is_zero() && self.gold_delta == 0 && self.potion_quantity_delta == 0;
        if empty && self.transaction_type != TransactionType::Reset {
            return Err(LedgerError::EmptyEntry {
                transaction_type: self.transaction_type,
            });
        }

        Ok(LedgerEntry {
            id: LedgerEntryId::new(),
            transaction_type: self.transaction_type,
            potion_type_id: self.potion_type_id,
            ml_delta: self.ml_delta,
            gold_delta: self.gold_delta,
            potion_quantity_delta: self.potion_quantity_delta,
            created_at: Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// Business event constructors
// ---------------------------------------------------------------------------

/// Raw liquid delivered: `ml` of one color added, `cost` gold spent.
pub fn delivery(color: Color, ml: i64, cost: i64) -> Result<LedgerEntry, LedgerError> {
    ensure_positive("ml", ml)?;
    let gold = cost
        .checked_neg()
        .ok_or(LedgerError::Overflow("delivery cost"))?;
    TransactionBuilder::new(TransactionType::Delivery)
        .ml(MlVector::single(color, ml))
        .gold(gold)
        .build()
}

/// A delivered barrel line from the wholesaler.
///
/// Adds `ml_per_barrel * quantity` of the barrel's color and spends
/// `price * quantity` gold.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidSku`] if the SKU names no color.
pub fn barrel_delivery(barrel: &Barrel) -> Result<LedgerEntry, LedgerError> {
    let color = Color::from_sku(&barrel.sku).ok_or_else(|| LedgerError::InvalidSku {
        sku: barrel.sku.clone(),
    })?;
    ensure_positive("quantity", barrel.quantity)?;
    let ml = barrel
        .ml_per_barrel
        .checked_mul(barrel.quantity)
        .ok_or(LedgerError::Overflow("delivered ml"))?;
    let cost = barrel
        .price
        .checked_mul(barrel.quantity)
        .ok_or(LedgerError::Overflow("delivery cost"))?;
    delivery(color, ml, cost)
}

/// Potions brewed: `composition * quantity` ml consumed, `quantity` units
/// of the potion type added.
pub fn bottling(
    potion_type_id: PotionTypeId,
    composition: MlVector,
    quantity: i64,
) -> Result<LedgerEntry, LedgerError> {
    ensure_positive("quantity", quantity)?;
    let consumed = composition
        .checked_scale(quantity)
        .and_then(MlVector::checked_neg)
        .ok_or(LedgerError::Overflow("bottled ml"))?;
    TransactionBuilder::new(TransactionType::Bottling)
        .potion_type(potion_type_id)
        .ml(consumed)
        .potions(quantity)
        .build()
}

/// A customer bought `quantity` units at `unit_price` gold each.
pub fn purchase(
    potion_type_id: PotionTypeId,
    quantity: i64,
    unit_price: i64,
) -> Result<LedgerEntry, LedgerError> {
    ensure_positive("quantity", quantity)?;
    let gold = unit_price
        .checked_mul(quantity)
        .ok_or(LedgerError::Overflow("purchase total"))?;
    let sold = quantity
        .checked_neg()
        .ok_or(LedgerError::Overflow("purchase quantity"))?;
    TransactionBuilder::new(TransactionType::Purchase)
        .potion_type(potion_type_id)
        .potions(sold)
        .gold(gold)
        .build()
}

/// A manual gold correction, e.g. starting funds.
pub fn adjustment(gold: i64) -> Result<LedgerEntry, LedgerError> {
    TransactionBuilder::new(TransactionType::Adjustment)
        .gold(gold)
        .build()
}

const fn ensure_positive(field: &'static str, value: i64) -> Result<(), LedgerError> {
    if value > 0 {
        Ok(())
    } else {
        Err(LedgerError::NonPositive { field, value })
    }
}
