//! API key middleware.
//!
//! The game server authenticates with a shared key in the `access_token`
//! header. Requests without it, or with the wrong value, are rejected
//! with 401 before reaching a handler.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "access_token";

/// Reject requests whose `access_token` header does not match the
/// configured key.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == state.api_key => {}
        Some(_) => {
            tracing::warn!(path = %req.uri().path(), "Rejected request with wrong API key");
            return Err(ApiError::Unauthorized);
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "Rejected request without API key");
            return Err(ApiError::Unauthorized);
        }
    }

    Ok(next.run(req).await)
}
