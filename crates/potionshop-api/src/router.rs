//! Axum router construction for the shop API.
//!
//! Every route except the public catalog sits behind the API key
//! middleware. CORS is open and every request is traced.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_api_key;
use crate::carts;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the shop.
///
/// Public:
/// - `GET /catalog/`
///
/// Behind `access_token`:
/// - `POST /barrels/plan`, `POST /barrels/deliver/{order_id}`
/// - `POST /bottler/plan`, `POST /bottler/deliver/{order_id}`
/// - `GET /inventory/audit`
/// - `POST /admin/reset`
/// - `POST /carts/`, `POST /carts/{cart_id}/items/{item_sku}`,
///   `POST /carts/{cart_id}/checkout`, `GET /carts/search/`,
///   `POST /carts/visits/{visit_id}`
/// - `POST /info/current_time`
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        // Barrels
        .route("/barrels/plan", post(handlers::plan_barrels))
        .route("/barrels/deliver/{order_id}", post(handlers::deliver_barrels))
        // Bottling
        .route("/bottler/plan", post(handlers::plan_bottling))
        .route("/bottler/deliver/{order_id}", post(handlers::deliver_bottles))
        // Inventory and admin
        .route("/inventory/audit", get(handlers::audit))
        .route("/admin/reset", post(handlers::reset))
        // Carts
        .route("/carts/", post(carts::create_cart))
        .route("/carts/search/", get(carts::search))
        .route("/carts/visits/{visit_id}", post(carts::post_visits))
        .route(
            "/carts/{cart_id}/items/{item_sku}",
            post(carts::set_item_quantity),
        )
        .route("/carts/{cart_id}/checkout", post(carts::checkout))
        // Info
        .route("/info/current_time", post(handlers::current_time))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_api_key,
        ));

    let public = Router::new().route("/catalog/", get(handlers::catalog));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
