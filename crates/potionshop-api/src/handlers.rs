//! Endpoint handlers for the game server's daily cycle.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/barrels/plan` | Plan barrel purchases from the wholesale catalog |
//! | `POST` | `/barrels/deliver/{order_id}` | Record delivered barrels |
//! | `POST` | `/bottler/plan` | Plan bottling from the ml on hand |
//! | `POST` | `/bottler/deliver/{order_id}` | Record bottled potions |
//! | `GET` | `/inventory/audit` | Potion, ml, and gold totals |
//! | `POST` | `/admin/reset` | Return the shop to its starting state |
//! | `GET` | `/catalog/` | Potions in stock (public) |
//! | `POST` | `/info/current_time` | Log the in-game time |
//!
//! Cart endpoints live in [`crate::carts`].

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use potionshop_types::{Barrel, BottlingRequest, GameTime};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Barrels
// ---------------------------------------------------------------------------

/// Plan which barrels to buy from today's wholesale catalog.
pub async fn plan_barrels(
    State(state): State<Arc<AppState>>,
    Json(catalog): Json<Vec<Barrel>>,
) -> Result<impl IntoResponse, ApiError> {
    let plan = state
        .shop
        .plan_barrels(&catalog, state.target_policy)
        .await?;
    Ok(Json(plan))
}

/// Record the barrels the wholesaler delivered for an order.
pub async fn deliver_barrels(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<i64>,
    Json(barrels): Json<Vec<Barrel>>,
) -> Result<impl IntoResponse, ApiError> {
    state.shop.deliver_barrels(order_id, &barrels).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// Bottling
// ---------------------------------------------------------------------------

/// Plan how many potions of each type to bottle.
pub async fn plan_bottling(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let plan = state.shop.plan_bottling().await?;
    Ok(Json(plan))
}

/// Record the potions bottled for an order.
pub async fn deliver_bottles(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<i64>,
    Json(bottles): Json<Vec<BottlingRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    state.shop.deliver_bottles(order_id, &bottles).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// Inventory, admin, catalog
// ---------------------------------------------------------------------------

/// Total potions, total ml, and gold.
pub async fn audit(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let audit = state.shop.audit().await?;
    Ok(Json(audit))
}

/// Reset the shop: gold back to the starting amount, no liquid, no
/// potions, no carts. History is kept.
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let entries = state.shop.reset().await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("Shop reset with {entries} compensating entries"),
    })))
}

/// Potions currently for sale.
pub async fn catalog(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let items = state.shop.catalog().await?;
    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// Info
// ---------------------------------------------------------------------------

/// Log the in-game time reported by the game server and echo it back.
pub async fn current_time(Json(time): Json<GameTime>) -> impl IntoResponse {
    tracing::info!(day = %time.day, hour = time.hour, "Game time");
    Json(time)
}
