//! Typed identifiers for catalog records.

use serde::{Deserialize, Serialize};

use grocery_core::RecordId;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub RecordId);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(RecordId::new(value))
            }

            pub fn record(&self) -> RecordId {
                self.0
            }

            pub fn unassigned() -> Self {
                Self(RecordId::unassigned())
            }

            pub fn is_unassigned(&self) -> bool {
                self.0.is_unassigned()
            }

            pub fn next(&self) -> Self {
                Self(self.0.next())
            }
        }

        impl From<RecordId> for $name {
            fn from(value: RecordId) -> Self {
                Self(value)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

record_id!(
    /// Product identifier.
    ProductId
);
record_id!(
    /// Grocery list identifier.
    GroceryListId
);
record_id!(
    /// Grocery list item identifier.
    GroceryListItemId
);
