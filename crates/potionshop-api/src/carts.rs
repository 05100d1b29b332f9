//! Cart endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/carts/` | Open a cart |
//! | `POST` | `/carts/{cart_id}/items/{item_sku}` | Add units of a potion |
//! | `POST` | `/carts/{cart_id}/checkout` | Sell the cart's contents |
//! | `GET` | `/carts/search/` | Page through open cart lines |
//! | `POST` | `/carts/visits/{visit_id}` | Log visiting customers |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use potionshop_db::OrderSearch;
use potionshop_types::{
    CartCheckout, CartId, CartItemQuantity, Customer, NewCart, SearchSortColumn, SearchSortOrder,
};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /carts/search/`.
#[derive(Debug, serde::Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    /// Case-insensitive substring of the customer name.
    pub customer_name: String,
    /// Case-insensitive substring of the potion SKU.
    pub potion_sku: String,
    /// 1-based page number.
    pub search_page: i64,
    /// Sort column (default `timestamp`).
    pub sort_col: SearchSortColumn,
    /// Sort direction (default `desc`).
    pub sort_order: SearchSortOrder,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            potion_sku: String::new(),
            search_page: 1,
            sort_col: SearchSortColumn::default(),
            sort_order: SearchSortOrder::default(),
        }
    }
}

impl From<SearchQuery> for OrderSearch {
    fn from(query: SearchQuery) -> Self {
        Self {
            customer_name: query.customer_name,
            potion_sku: query.potion_sku,
            page: query.search_page,
            sort_col: query.sort_col,
            sort_order: query.sort_order,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Open a cart for a customer.
pub async fn create_cart(
    State(state): State<Arc<AppState>>,
    Json(customer): Json<Customer>,
) -> Result<impl IntoResponse, ApiError> {
    let cart_id = state.shop.create_cart(&customer).await?;
    Ok(Json(NewCart { cart_id }))
}

/// Add units of a potion to a cart.
pub async fn set_item_quantity(
    State(state): State<Arc<AppState>>,
    Path((cart_id, item_sku)): Path<(i64, String)>,
    Json(item): Json<CartItemQuantity>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .shop
        .set_item_quantity(CartId(cart_id), &item_sku, item.quantity)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Check out a cart.
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    Path(cart_id): Path<i64>,
    Json(checkout): Json<CartCheckout>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state
        .shop
        .checkout(CartId(cart_id), &checkout.payment)
        .await?;
    Ok(Json(summary))
}

/// Search open cart lines, five per page.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.shop.search(&OrderSearch::from(params)).await?;
    Ok(Json(page))
}

/// Log which customers visited the shop.
pub async fn post_visits(
    Path(visit_id): Path<i64>,
    Json(customers): Json<Vec<Customer>>,
) -> impl IntoResponse {
    tracing::info!(visit_id, customers = customers.len(), "Customers visited");
    for customer in &customers {
        tracing::debug!(
            visit_id,
            customer = %customer.customer_name,
            class = %customer.character_class,
            level = customer.level,
            "Visitor"
        );
    }
    Json(serde_json::json!({ "success": true }))
}
