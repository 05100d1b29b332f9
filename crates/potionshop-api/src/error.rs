//! Error types for the shop API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body has the shape `{"error": "...", "status": 400}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use potionshop_db::DbError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The `access_token` header is missing or wrong.
    #[error("unauthorized")]
    Unauthorized,

    /// The requested cart or potion does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request is well-formed but cannot be carried out.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Persistence failed. The operation's transaction was rolled back.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::CartNotFound(_) | DbError::UnknownSku(_) => Self::NotFound(err.to_string()),
            DbError::EmptyCart(_)
            | DbError::InsufficientStock { .. }
            | DbError::Ledger(_)
            | DbError::Plan(_) => Self::BadRequest(err.to_string()),
            DbError::Postgres(_)
            | DbError::Migration(_)
            | DbError::Decode(_)
            | DbError::Config(_) => {
                tracing::error!(error = %err, "Persistence failure");
                Self::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use potionshop_ledger::LedgerError;
    use potionshop_planner::PlanError;
    use potionshop_types::CartId;

    fn status_of(err: DbError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn missing_things_are_not_found() {
        assert_eq!(status_of(DbError::CartNotFound(CartId(9))), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(DbError::UnknownSku("PLAID_POTION".to_owned())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn rejected_operations_are_bad_requests() {
        assert_eq!(status_of(DbError::EmptyCart(CartId(1))), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(DbError::InsufficientStock {
                sku: "RED_POTION_0".to_owned(),
                requested: 3,
                available: 1,
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DbError::Plan(PlanError::InvalidSku {
                sku: "TEAL".to_owned()
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DbError::Ledger(LedgerError::InvalidSku {
                sku: "TEAL".to_owned()
            })),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn persistence_failures_are_internal() {
        assert_eq!(
            status_of(DbError::Decode("bad row".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(DbError::Config("bad url".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
