//! Transactional shop operations.
//!
//! Each operation that reads balances and writes ledger rows runs inside
//! one `SERIALIZABLE` transaction. Every early return drops the
//! transaction, which rolls it back, so an operation either appends all of
//! its entries or none of them.
//!
//! Plans are computed from a snapshot and written nowhere. Two planners
//! running at once may both plan against the same gold; the wholesaler's
//! delivery is what finally hits the ledger.

use potionshop_ledger::{BalanceScope, LedgerError, compensating_entries, transaction};
use potionshop_planner::{TargetPolicy, plan_bottling, plan_purchases, resolve_offers};
use potionshop_types::{
    Balance, Barrel, BottlingRequest, CartId, CatalogItem, CheckoutSummary, Customer,
    InventoryAudit, PurchaseRequest, SearchPage,
};

use crate::cart_store::{CartStore, OrderSearch, SEARCH_PAGE_SIZE};
use crate::error::DbError;
use crate::ledger_store::LedgerStore;
use crate::postgres::PostgresPool;
use crate::potion_store::PotionStore;

/// Shop operations over a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct Shop {
    pool: PostgresPool,
}

impl Shop {
    /// Wrap a connected pool.
    pub const fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub const fn pool(&self) -> &PostgresPool {
        &self.pool
    }

    // -----------------------------------------------------------------------
    // Balances
    // -----------------------------------------------------------------------

    /// Current balance derived from the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the read fails.
    pub async fn balance(&self, scope: BalanceScope) -> Result<Balance, DbError> {
        let mut tx = self.pool.begin_serializable().await?;
        let balance = LedgerStore::new(&mut tx).balance(scope).await?;
        tx.commit().await?;
        Ok(balance)
    }

    /// Totals for the inventory audit.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the read fails.
    pub async fn audit(&self) -> Result<InventoryAudit, DbError> {
        let balance = self.balance(BalanceScope::All).await?;
        Ok(InventoryAudit {
            potions: balance.total_potions(),
            ml_in_barrels: balance.ml.total(),
            gold: balance.gold,
        })
    }

    /// Potion types the shop currently has in stock.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if a read fails.
    pub async fn catalog(&self) -> Result<Vec<CatalogItem>, DbError> {
        let mut tx = self.pool.begin_serializable().await?;
        let potions = PotionStore::new(&mut tx).all().await?;
        let balance = LedgerStore::new(&mut tx).balance(BalanceScope::All).await?;
        tx.commit().await?;

        Ok(potions
            .into_iter()
            .filter_map(|potion| {
                let quantity = balance.potion_quantity(potion.id);
                (quantity > 0).then(|| CatalogItem {
                    sku: potion.sku,
                    name: potion.name,
                    quantity,
                    price: potion.price,
                    potion_type: potion.composition,
                })
            })
            .collect())
    }

    // -----------------------------------------------------------------------
    // Barrels
    // -----------------------------------------------------------------------

    /// Plan today's barrel purchases from the wholesale catalog.
    ///
    /// SKUs are resolved before the ledger is read, so a bad catalog fails
    /// without touching the database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Plan`] if a SKU names no color, or
    /// [`DbError::Postgres`] if the balance read fails.
    pub async fn plan_barrels(
        &self,
        catalog: &[Barrel],
        policy: TargetPolicy,
    ) -> Result<Vec<PurchaseRequest>, DbError> {
        let offers = resolve_offers(catalog)?;
        let balance = self.balance(BalanceScope::All).await?;
        let plan = plan_purchases(&offers, &balance, policy);
        tracing::info!(
            offers = catalog.len(),
            purchases = plan.len(),
            gold = balance.gold,
            "Planned barrel purchases"
        );
        Ok(plan)
    }

    /// Record delivered barrels: one `delivery` entry per barrel line.
    ///
    /// Lines with zero quantity are ignored. Returns the number of entries
    /// appended.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Ledger`] if any SKU names no color (nothing is
    /// recorded), or [`DbError::Postgres`] if the write fails.
    pub async fn deliver_barrels(&self, order_id: i64, barrels: &[Barrel]) -> Result<usize, DbError> {
        let entries = barrels
            .iter()
            .filter(|barrel| barrel.quantity != 0)
            .map(transaction::barrel_delivery)
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.pool.begin_serializable().await?;
        LedgerStore::new(&mut tx).append_all(&entries).await?;
        tx.commit().await?;

        tracing::info!(order_id, entries = entries.len(), "Barrels delivered");
        Ok(entries.len())
    }

    // -----------------------------------------------------------------------
    // Bottling
    // -----------------------------------------------------------------------

    /// Plan bottling across every potion type from the ml on hand.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if a read fails.
    pub async fn plan_bottling(&self) -> Result<Vec<BottlingRequest>, DbError> {
        let mut tx = self.pool.begin_serializable().await?;
        let recipes = PotionStore::new(&mut tx).all().await?;
        let balance = LedgerStore::new(&mut tx).balance(BalanceScope::All).await?;
        tx.commit().await?;

        let plan = plan_bottling(&recipes, &balance);
        tracing::info!(recipes = recipes.len(), lines = plan.len(), "Planned bottling");
        Ok(plan)
    }

    /// Record bottled potions: one `bottling` entry per line.
    ///
    /// Each composition must match a defined potion type. Lines with zero
    /// quantity are ignored. Returns the number of entries appended.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Ledger`] with [`LedgerError::UnknownComposition`]
    /// if a composition matches no potion type (nothing is recorded), or
    /// [`DbError::Postgres`] if a read or write fails.
    pub async fn deliver_bottles(
        &self,
        order_id: i64,
        bottles: &[BottlingRequest],
    ) -> Result<usize, DbError> {
        let mut tx = self.pool.begin_serializable().await?;

        let mut entries = Vec::with_capacity(bottles.len());
        for bottle in bottles.iter().filter(|b| b.quantity != 0) {
            let potion = PotionStore::new(&mut tx)
                .by_composition(bottle.potion_type)
                .await?
                .ok_or(LedgerError::UnknownComposition {
                    composition: bottle.potion_type,
                })?;
            entries.push(transaction::bottling(
                potion.id,
                potion.composition,
                bottle.quantity,
            )?);
        }

        LedgerStore::new(&mut tx).append_all(&entries).await?;
        tx.commit().await?;

        tracing::info!(order_id, entries = entries.len(), "Bottles delivered");
        Ok(entries.len())
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    /// Return the shop to its starting state.
    ///
    /// Appends compensating `reset` entries that bring gold to
    /// [`potionshop_ledger::RESET_GOLD`] and liquid and every potion to
    /// zero, then deletes all carts. History is kept. Returns the number
    /// of entries appended.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if a read or write fails.
    pub async fn reset(&self) -> Result<usize, DbError> {
        let mut tx = self.pool.begin_serializable().await?;

        let balance = LedgerStore::new(&mut tx).balance(BalanceScope::All).await?;
        let entries = compensating_entries(&balance)?;
        LedgerStore::new(&mut tx).append_all(&entries).await?;
        let carts = CartStore::new(&mut tx).delete_all().await?;

        tx.commit().await?;

        tracing::info!(
            entries = entries.len(),
            carts_removed = carts,
            previous_gold = balance.gold,
            "Shop reset"
        );
        Ok(entries.len())
    }

    // -----------------------------------------------------------------------
    // Carts
    // -----------------------------------------------------------------------

    /// Open a cart for a customer.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn create_cart(&self, customer: &Customer) -> Result<CartId, DbError> {
        let mut tx = self.pool.begin_serializable().await?;
        let cart_id = CartStore::new(&mut tx).create(customer).await?;
        tx.commit().await?;

        tracing::info!(
            cart_id = %cart_id,
            customer = %customer.customer_name,
            "Cart created"
        );
        Ok(cart_id)
    }

    /// Add `quantity` units of the potion with `sku` to a cart.
    ///
    /// Adding a potion already in the cart increases its quantity.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Ledger`] if `quantity` is not positive,
    /// [`DbError::CartNotFound`] or [`DbError::UnknownSku`] if either does
    /// not exist, or [`DbError::Postgres`] if a read or write fails.
    pub async fn set_item_quantity(
        &self,
        cart_id: CartId,
        sku: &str,
        quantity: i64,
    ) -> Result<(), DbError> {
        if quantity <= 0 {
            return Err(LedgerError::NonPositive {
                field: "quantity",
                value: quantity,
            }
            .into());
        }

        let mut tx = self.pool.begin_serializable().await?;
        if !CartStore::new(&mut tx).exists(cart_id).await? {
            return Err(DbError::CartNotFound(cart_id));
        }
        let potion = PotionStore::new(&mut tx)
            .by_sku(sku)
            .await?
            .ok_or_else(|| DbError::UnknownSku(sku.to_owned()))?;
        CartStore::new(&mut tx)
            .add_item(cart_id, potion.id, quantity, potion.price)
            .await?;
        tx.commit().await?;

        tracing::debug!(cart_id = %cart_id, sku, quantity, "Cart item added");
        Ok(())
    }

    /// Check out a cart: one `purchase` entry per line, then delete it.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::CartNotFound`], [`DbError::EmptyCart`], or
    /// [`DbError::InsufficientStock`] when the sale cannot happen (nothing
    /// is recorded), or [`DbError::Postgres`] if a read or write fails.
    pub async fn checkout(&self, cart_id: CartId, payment: &str) -> Result<CheckoutSummary, DbError> {
        let mut tx = self.pool.begin_serializable().await?;

        if !CartStore::new(&mut tx).exists(cart_id).await? {
            return Err(DbError::CartNotFound(cart_id));
        }
        let items = CartStore::new(&mut tx).items(cart_id).await?;
        if items.is_empty() {
            return Err(DbError::EmptyCart(cart_id));
        }

        let mut entries = Vec::with_capacity(items.len());
        let mut summary = CheckoutSummary {
            total_potions_bought: 0,
            total_gold_paid: 0,
        };
        for item in &items {
            let potion_type = item.potion_type();
            let available = LedgerStore::new(&mut tx)
                .balance(BalanceScope::PotionType(potion_type))
                .await?
                .potion_quantity(potion_type);
            if available < item.quantity {
                return Err(DbError::InsufficientStock {
                    sku: item.sku.clone(),
                    requested: item.quantity,
                    available,
                });
            }

            let entry = transaction::purchase(potion_type, item.quantity, item.price)?;
            summary.total_potions_bought = summary
                .total_potions_bought
                .checked_add(item.quantity)
                .ok_or(LedgerError::Overflow("checkout potions"))?;
            summary.total_gold_paid = summary
                .total_gold_paid
                .checked_add(entry.gold_delta)
                .ok_or(LedgerError::Overflow("checkout gold"))?;
            entries.push(entry);
        }

        LedgerStore::new(&mut tx).append_all(&entries).await?;
        CartStore::new(&mut tx).delete(cart_id).await?;
        tx.commit().await?;

        tracing::info!(
            cart_id = %cart_id,
            payment,
            potions = summary.total_potions_bought,
            gold = summary.total_gold_paid,
            "Cart checked out"
        );
        Ok(summary)
    }

    /// Search open cart lines, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn search(&self, search: &OrderSearch) -> Result<SearchPage, DbError> {
        let mut conn = self.pool.pool().acquire().await?;
        let results = CartStore::new(&mut conn).search(search).await?;

        let page = search.page();
        let previous = (page > 1).then_some(page.saturating_sub(1));
        let full = i64::try_from(results.len()).is_ok_and(|n| n == SEARCH_PAGE_SIZE);
        let next = full.then_some(page.saturating_add(1));

        Ok(SearchPage {
            previous,
            next,
            results,
        })
    }
}
