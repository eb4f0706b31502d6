// ── Integer identifiers ──
//
// The backend assigns integer ids, unique within their collection.
// Transparent serde newtypes keep them from being mixed up.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

id_newtype!(
    /// Identity of an inventory or shopping item within its collection.
    ItemId
);

id_newtype!(
    /// Reference to a catalog product.
    ProductId
);

id_newtype!(
    /// Key for suggestion lookups (shelf life, storage recommendation).
    CategoryId
);
