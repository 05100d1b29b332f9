//! Ledger persistence over the `inventory_ledger` table.
//!
//! The store borrows a connection rather than a pool so that appends and
//! balance reads join whatever transaction the caller has open. Rows are
//! only ever inserted; nothing here updates or deletes ledger history.

use std::collections::BTreeMap;

use potionshop_ledger::BalanceScope;
use potionshop_types::{
    Balance, LedgerEntry, LedgerEntryId, MlVector, PotionTypeId, TransactionType,
};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::DbError;

/// Operations on the `inventory_ledger` table.
pub struct LedgerStore<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> LedgerStore<'c> {
    /// Create a ledger store bound to a connection or open transaction.
    pub const fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Append a single entry.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn append(&mut self, entry: &LedgerEntry) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO inventory_ledger (id, transaction_type, potion_type_id, num_red_ml_change, num_green_ml_change, num_blue_ml_change, num_dark_ml_change, gold_change, potion_quantity_change, created_at)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(entry.id.into_inner())
        .bind(entry.transaction_type.as_db_str())
        .bind(entry.potion_type_id.map(PotionTypeId::into_inner))
        .bind(entry.ml_delta.red)
        .bind(entry.ml_delta.green)
        .bind(entry.ml_delta.blue)
        .bind(entry.ml_delta.dark)
        .bind(entry.gold_delta)
        .bind(entry.potion_quantity_delta)
        .bind(entry.created_at)
        .execute(&mut *self.conn)
        .await?;

        tracing::debug!(
            id = %entry.id,
            transaction_type = %entry.transaction_type,
            "Appended ledger entry"
        );
        Ok(())
    }

    /// Append many entries in one statement using `UNNEST` arrays.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn append_all(&mut self, entries: &[LedgerEntry]) -> Result<(), DbError> {
        if entries.is_empty() {
            return Ok(());
        }

        let len = entries.len();
        let mut ids = Vec::with_capacity(len);
        let mut types = Vec::with_capacity(len);
        let mut potion_types: Vec<Option<i64>> = Vec::with_capacity(len);
        let mut reds = Vec::with_capacity(len);
        let mut greens = Vec::with_capacity(len);
        let mut blues = Vec::with_capacity(len);
        let mut darks = Vec::with_capacity(len);
        let mut golds = Vec::with_capacity(len);
        let mut quantities = Vec::with_capacity(len);
        let mut timestamps = Vec::with_capacity(len);

        for entry in entries {
            ids.push(entry.id.into_inner());
            types.push(entry.transaction_type.as_db_str().to_owned());
            potion_types.push(entry.potion_type_id.map(PotionTypeId::into_inner));
            reds.push(entry.ml_delta.red);
            greens.push(entry.ml_delta.green);
            blues.push(entry.ml_delta.blue);
            darks.push(entry.ml_delta.dark);
            golds.push(entry.gold_delta);
            quantities.push(entry.potion_quantity_delta);
            timestamps.push(entry.created_at);
        }

        sqlx::query(
            r"INSERT INTO inventory_ledger (id, transaction_type, potion_type_id, num_red_ml_change, num_green_ml_change, num_blue_ml_change, num_dark_ml_change, gold_change, potion_quantity_change, created_at)
              SELECT * FROM UNNEST($1::UUID[], $2::TEXT[], $3::BIGINT[], $4::BIGINT[], $5::BIGINT[], $6::BIGINT[], $7::BIGINT[], $8::BIGINT[], $9::BIGINT[], $10::TIMESTAMPTZ[])",
        )
        .bind(&ids)
        .bind(&types)
        .bind(&potion_types)
        .bind(&reds)
        .bind(&greens)
        .bind(&blues)
        .bind(&darks)
        .bind(&golds)
        .bind(&quantities)
        .bind(&timestamps)
        .execute(&mut *self.conn)
        .await?;

        tracing::debug!(count = len, "Appended ledger entries (batch UNNEST)");
        Ok(())
    }

    /// Derive the balance by summing every entry.
    ///
    /// Gold and ml always cover the whole ledger. With
    /// [`BalanceScope::PotionType`] only that type's quantity is computed
    /// (and is present even when zero); otherwise every type that appears
    /// in the ledger is included. An empty ledger yields an all-zero
    /// balance.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if a query fails.
    pub async fn balance(&mut self, scope: BalanceScope) -> Result<Balance, DbError> {
        let totals = sqlx::query_as::<_, TotalsRow>(
            r"SELECT COALESCE(SUM(gold_change), 0)::BIGINT AS gold,
                     COALESCE(SUM(num_red_ml_change), 0)::BIGINT AS red,
                     COALESCE(SUM(num_green_ml_change), 0)::BIGINT AS green,
                     COALESCE(SUM(num_blue_ml_change), 0)::BIGINT AS blue,
                     COALESCE(SUM(num_dark_ml_change), 0)::BIGINT AS dark
              FROM inventory_ledger",
        )
        .fetch_one(&mut *self.conn)
        .await?;

        let potions = match scope.potion_type() {
            Some(id) => {
                let quantity = sqlx::query_scalar::<_, i64>(
                    r"SELECT COALESCE(SUM(potion_quantity_change), 0)::BIGINT
                      FROM inventory_ledger
                      WHERE potion_type_id = $1",
                )
                .bind(id.into_inner())
                .fetch_one(&mut *self.conn)
                .await?;
                BTreeMap::from([(id, quantity)])
            }
            None => sqlx::query_as::<_, (i64, i64)>(
                r"SELECT potion_type_id, COALESCE(SUM(potion_quantity_change), 0)::BIGINT
                  FROM inventory_ledger
                  WHERE potion_type_id IS NOT NULL
                  GROUP BY potion_type_id",
            )
            .fetch_all(&mut *self.conn)
            .await?
            .into_iter()
            .map(|(id, quantity)| (PotionTypeId(id), quantity))
            .collect(),
        };

        Ok(Balance {
            gold: totals.gold,
            ml: MlVector::new(totals.red, totals.green, totals.blue, totals.dark),
            potions,
        })
    }

    /// All entries in append order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails, or
    /// [`DbError::Decode`] if a row carries an unknown transaction type.
    pub async fn entries(&mut self) -> Result<Vec<LedgerEntry>, DbError> {
        let rows = sqlx::query_as::<_, LedgerRow>(
            r"SELECT id, transaction_type, potion_type_id, num_red_ml_change, num_green_ml_change, num_blue_ml_change, num_dark_ml_change, gold_change, potion_quantity_change, created_at
              FROM inventory_ledger
              ORDER BY created_at, id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        rows.into_iter().map(LedgerEntry::try_from).collect()
    }
}

#[derive(sqlx::FromRow)]
struct TotalsRow {
    gold: i64,
    red: i64,
    green: i64,
    blue: i64,
    dark: i64,
}

/// A row from the `inventory_ledger` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LedgerRow {
    /// Ledger entry UUID.
    pub id: Uuid,
    /// Transaction type as stored.
    pub transaction_type: String,
    /// Potion type the entry concerns, if any.
    pub potion_type_id: Option<i64>,
    /// Red ml delta.
    pub num_red_ml_change: i64,
    /// Green ml delta.
    pub num_green_ml_change: i64,
    /// Blue ml delta.
    pub num_blue_ml_change: i64,
    /// Dark ml delta.
    pub num_dark_ml_change: i64,
    /// Gold delta.
    pub gold_change: i64,
    /// Potion quantity delta.
    pub potion_quantity_change: i64,
    /// Insert timestamp.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<LedgerRow> for LedgerEntry {
    type Error = DbError;

    fn try_from(row: LedgerRow) -> Result<Self, Self::Error> {
        let transaction_type = TransactionType::from_db_str(&row.transaction_type)
            .ok_or_else(|| {
                DbError::Decode(format!(
                    "unknown transaction type {:?} in ledger entry {}",
                    row.transaction_type, row.id
                ))
            })?;
        Ok(Self {
            id: LedgerEntryId(row.id),
            transaction_type,
            potion_type_id: row.potion_type_id.map(PotionTypeId),
            ml_delta: MlVector::new(
                row.num_red_ml_change,
                row.num_green_ml_change,
                row.num_blue_ml_change,
                row.num_dark_ml_change,
            ),
            gold_delta: row.gold_change,
            potion_quantity_delta: row.potion_quantity_change,
            created_at: row.created_at,
        })
    }
}
