//! Per-color ml targets for barrel purchasing.
//!
//! The purchase planner keeps buying a color while its ml level is below
//! the color's target. Targets are computed once from the starting
//! balance, before any simulated purchase.

use potionshop_types::MlVector;
use serde::{Deserialize, Serialize};

/// Target used by [`TargetPolicy::Equalize`] when the shop holds no liquid.
pub const DEFAULT_FALLBACK_TARGET: i64 = 100;

/// How the per-color ml target is chosen.
///
/// Configured in YAML as, for example:
///
/// ```yaml
/// target_policy:
///   kind: fixed
///   threshold: 500
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetPolicy {
    /// Every color targets the same constant.
    Fixed {
        /// Ml level below which a color is restocked.
        threshold: i64,
    },
    /// Every color targets the mean ml level across the four colors, so
    /// purchases pull the colors toward each other. If the mean is zero,
    /// `fallback` is used instead.
    Equalize {
        /// Target when the mean is zero.
        #[serde(default = "default_fallback")]
        fallback: i64,
    },
}

const fn default_fallback() -> i64 {
    DEFAULT_FALLBACK_TARGET
}

impl Default for TargetPolicy {
    fn default() -> Self {
        Self::Equalize {
            fallback: DEFAULT_FALLBACK_TARGET,
        }
    }
}

impl TargetPolicy {
    /// Compute the target for each color given the current ml levels.
    ///
    /// Negative levels are treated as zero and targets are never
    /// negative.
    pub fn targets(self, ml: MlVector) -> MlVector {
        let target = match self {
            Self::Fixed { threshold } => threshold,
            Self::Equalize { fallback } => {
                let mean = ml.clamp_non_negative().total().checked_div(4).unwrap_or(0);
                if mean == 0 { fallback } else { mean }
            }
        };
        let target = target.max(0);
        MlVector::new(target, target, target, target)
    }
}
