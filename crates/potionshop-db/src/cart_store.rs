//! Customer carts over the `carts` and `cart_items` tables.
//!
//! Carts are working state, not history: checkout and reset delete them.
//! Sales are recorded in the inventory ledger, never here.

use potionshop_types::{
    CartId, Customer, OrderLineItem, PotionTypeId, SearchSortColumn, SearchSortOrder,
};
use sqlx::PgConnection;

use crate::error::DbError;

/// Maximum number of line items on one search page.
pub const SEARCH_PAGE_SIZE: i64 = 5;

/// Filters, paging, and ordering for an order search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSearch {
    /// Case-insensitive substring of the customer name. Empty matches all.
    pub customer_name: String,
    /// Case-insensitive substring of the potion SKU. Empty matches all.
    pub potion_sku: String,
    /// 1-based page number. Values below 1 are treated as 1.
    pub page: i64,
    /// Sort column.
    pub sort_col: SearchSortColumn,
    /// Sort direction.
    pub sort_order: SearchSortOrder,
}

impl OrderSearch {
    /// Page number clamped to at least 1.
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// Row offset of the first result on this page.
    pub fn offset(&self) -> i64 {
        self.page()
            .saturating_sub(1)
            .saturating_mul(SEARCH_PAGE_SIZE)
    }

    /// `ORDER BY` clause built from the whitelisted column and direction.
    fn order_by(&self) -> String {
        let column = match self.sort_col {
            SearchSortColumn::CustomerName => "c.customer_name",
            SearchSortColumn::ItemSku => "pt.sku",
            SearchSortColumn::LineItemTotal => "line_item_total",
            SearchSortColumn::Timestamp => "c.created_at",
        };
        let direction = match self.sort_order {
            SearchSortOrder::Asc => "ASC",
            SearchSortOrder::Desc => "DESC",
        };
        format!("ORDER BY {column} {direction}, c.id, pt.id")
    }
}

/// One line of a cart, joined with its potion SKU.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CartItemRow {
    /// Potion type id.
    pub potion_type_id: i64,
    /// Potion SKU.
    pub sku: String,
    /// Units in the cart.
    pub quantity: i64,
    /// Unit price captured when the item was added.
    pub price: i64,
}

impl CartItemRow {
    /// The potion type as a typed id.
    pub const fn potion_type(&self) -> PotionTypeId {
        PotionTypeId(self.potion_type_id)
    }
}

#[derive(sqlx::FromRow)]
struct SearchRow {
    item_sku: String,
    customer_name: String,
    line_item_total: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Operations on the `carts` and `cart_items` tables.
pub struct CartStore<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> CartStore<'c> {
    /// Create a cart store bound to a connection or open transaction.
    pub const fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Open a new cart for a customer.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn create(&mut self, customer: &Customer) -> Result<CartId, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            r"INSERT INTO carts (customer_name, character_class, level)
              VALUES ($1, $2, $3)
              RETURNING id",
        )
        .bind(&customer.customer_name)
        .bind(&customer.character_class)
        .bind(customer.level)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(CartId(id))
    }

    /// Whether the cart exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn exists(&mut self, cart_id: CartId) -> Result<bool, DbError> {
        let found = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM carts WHERE id = $1)",
        )
        .bind(cart_id.into_inner())
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(found)
    }

    /// Add `quantity` units of a potion to a cart, merging with an
    /// existing line for the same potion.
    ///
    /// The unit price of a new line is fixed at `price`; merged lines keep
    /// the price they were first added at.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the upsert fails.
    pub async fn add_item(
        &mut self,
        cart_id: CartId,
        potion_type_id: PotionTypeId,
        quantity: i64,
        price: i64,
    ) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO cart_items (cart_id, potion_type_id, quantity, price)
              VALUES ($1, $2, $3, $4)
              ON CONFLICT (cart_id, potion_type_id)
              DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity",
        )
        .bind(cart_id.into_inner())
        .bind(potion_type_id.into_inner())
        .bind(quantity)
        .bind(price)
        .execute(&mut *self.conn)
        .await?;
        Ok(())
    }

    /// Lines of a cart, ordered by potion type id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn items(&mut self, cart_id: CartId) -> Result<Vec<CartItemRow>, DbError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r"SELECT ci.potion_type_id, pt.sku, ci.quantity, ci.price
              FROM cart_items ci
              JOIN potion_types pt ON pt.id = ci.potion_type_id
              WHERE ci.cart_id = $1
              ORDER BY ci.potion_type_id",
        )
        .bind(cart_id.into_inner())
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Delete a cart and its lines.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the delete fails.
    pub async fn delete(&mut self, cart_id: CartId) -> Result<(), DbError> {
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id.into_inner())
            .execute(&mut *self.conn)
            .await?;
        sqlx::query("DELETE FROM carts WHERE id = $1")
            .bind(cart_id.into_inner())
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }

    /// Delete every cart and line. Returns the number of carts removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the delete fails.
    pub async fn delete_all(&mut self) -> Result<u64, DbError> {
        sqlx::query("DELETE FROM cart_items")
            .execute(&mut *self.conn)
            .await?;
        let result = sqlx::query("DELETE FROM carts")
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Search open cart lines.
    ///
    /// Returns at most [`SEARCH_PAGE_SIZE`] lines. Each line's id is its
    /// position in the full ordered result set, so ids are unique across
    /// pages of the same search.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn search(&mut self, search: &OrderSearch) -> Result<Vec<OrderLineItem>, DbError> {
        let sql = format!(
            r"SELECT pt.sku AS item_sku,
                     c.customer_name,
                     (ci.quantity * ci.price)::BIGINT AS line_item_total,
                     c.created_at
              FROM carts c
              JOIN cart_items ci ON ci.cart_id = c.id
              JOIN potion_types pt ON pt.id = ci.potion_type_id
              WHERE c.customer_name ILIKE '%' || $1 || '%'
                AND pt.sku ILIKE '%' || $2 || '%'
              {}
              LIMIT $3 OFFSET $4",
            search.order_by()
        );

        let rows = sqlx::query_as::<_, SearchRow>(&sql)
            .bind(&search.customer_name)
            .bind(&search.potion_sku)
            .bind(SEARCH_PAGE_SIZE)
            .bind(search.offset())
            .fetch_all(&mut *self.conn)
            .await?;

        let offset = search.offset();
        Ok(rows
            .into_iter()
            .zip(0_i64..)
            .map(|(row, position)| OrderLineItem {
                line_item_id: offset.saturating_add(position).saturating_add(1),
                item_sku: row.item_sku,
                customer_name: row.customer_name,
                line_item_total: row.line_item_total,
                timestamp: row.created_at.to_rfc3339(),
            })
            .collect())
    }
}
