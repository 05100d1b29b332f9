//! Shared application state for the shop API.

use potionshop_db::Shop;
use potionshop_planner::TargetPolicy;

/// State shared by every handler.
///
/// Holds no balances: every request derives what it needs from the
/// ledger through [`Shop`].
#[derive(Debug, Clone)]
pub struct AppState {
    /// Transactional shop operations.
    pub shop: Shop,
    /// Value the `access_token` header must carry.
    pub api_key: String,
    /// Per-color ml targets used by the barrel planner.
    pub target_policy: TargetPolicy,
}

impl AppState {
    /// Create application state.
    pub const fn new(shop: Shop, api_key: String, target_policy: TargetPolicy) -> Self {
        Self {
            shop,
            api_key,
            target_policy,
        }
    }
}
