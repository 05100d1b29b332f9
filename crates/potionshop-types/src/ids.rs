//! Type-safe identifier wrappers.
//!
//! Ledger entries are identified by UUID v7 (time-ordered) generated on
//! the application side, so an entry has its identity before it reaches
//! `PostgreSQL`. Potion types and carts use the integer serial keys of
//! their tables because those integers are part of the public HTTP
//! contract (`/carts/{cart_id}/...`).

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Generates a newtype wrapper around a `BIGSERIAL` key.
macro_rules! define_serial_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub i64);

        impl $name {
            /// Return the inner database key.
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_uuid_id! {
    /// Unique identifier for an entry in the inventory ledger.
    LedgerEntryId
}

define_serial_id! {
    /// Key of a potion type (recipe) in the `potion_types` table.
    PotionTypeId
}

define_serial_id! {
    /// Key of a customer cart in the `carts` table.
    CartId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_are_time_ordered() {
        let first = LedgerEntryId::new();
        let second = LedgerEntryId::new();
        assert!(first < second);
    }

    #[test]
    fn serial_ids_serialize_as_plain_numbers() {
        let id = PotionTypeId::from(7);
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("7"));

        let back: Option<CartId> = serde_json::from_str("42").ok();
        assert_eq!(back, Some(CartId(42)));
    }
}
