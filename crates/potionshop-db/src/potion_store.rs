//! Potion type (recipe) lookups over the `potion_types` table.

use potionshop_types::{MlVector, PotionType, PotionTypeId};
use sqlx::PgConnection;

use crate::error::DbError;

const SELECT_POTION: &str = "SELECT id, sku, name, price, red, green, blue, dark FROM potion_types";

/// Operations on the `potion_types` table.
pub struct PotionStore<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PotionStore<'c> {
    /// Create a potion store bound to a connection or open transaction.
    pub const fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Every potion type, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn all(&mut self) -> Result<Vec<PotionType>, DbError> {
        let rows = sqlx::query_as::<_, PotionRow>(&format!("{SELECT_POTION} ORDER BY id"))
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows.into_iter().map(PotionType::from).collect())
    }

    /// Look up a potion type by its exact SKU.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn by_sku(&mut self, sku: &str) -> Result<Option<PotionType>, DbError> {
        let row = sqlx::query_as::<_, PotionRow>(&format!("{SELECT_POTION} WHERE sku = $1"))
            .bind(sku)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row.map(PotionType::from))
    }

    /// Look up the potion type brewed from exactly `composition`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn by_composition(
        &mut self,
        composition: MlVector,
    ) -> Result<Option<PotionType>, DbError> {
        let row = sqlx::query_as::<_, PotionRow>(&format!(
            "{SELECT_POTION} WHERE red = $1 AND green = $2 AND blue = $3 AND dark = $4"
        ))
        .bind(composition.red)
        .bind(composition.green)
        .bind(composition.blue)
        .bind(composition.dark)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row.map(PotionType::from))
    }

    /// Define a new potion type.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails, including when
    /// the SKU or composition is already taken.
    pub async fn insert(
        &mut self,
        sku: &str,
        name: &str,
        price: i64,
        composition: MlVector,
    ) -> Result<PotionType, DbError> {
        let row = sqlx::query_as::<_, PotionRow>(
            r"INSERT INTO potion_types (sku, name, price, red, green, blue, dark)
              VALUES ($1, $2, $3, $4, $5, $6, $7)
              RETURNING id, sku, name, price, red, green, blue, dark",
        )
        .bind(sku)
        .bind(name)
        .bind(price)
        .bind(composition.red)
        .bind(composition.green)
        .bind(composition.blue)
        .bind(composition.dark)
        .fetch_one(&mut *self.conn)
        .await?;

        tracing::info!(sku, "Defined potion type");
        Ok(PotionType::from(row))
    }
}

/// A row from the `potion_types` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PotionRow {
    /// Potion type id.
    pub id: i64,
    /// Catalog SKU.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Unit price in gold.
    pub price: i64,
    /// Red ml per unit.
    pub red: i64,
    /// Green ml per unit.
    pub green: i64,
    /// Blue ml per unit.
    pub blue: i64,
    /// Dark ml per unit.
    pub dark: i64,
}

impl From<PotionRow> for PotionType {
    fn from(row: PotionRow) -> Self {
        Self {
            id: PotionTypeId(row.id),
            sku: row.sku,
            name: row.name,
            price: row.price,
            composition: MlVector::new(row.red, row.green, row.blue, row.dark),
        }
    }
}
