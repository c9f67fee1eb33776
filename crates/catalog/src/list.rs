use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use grocery_core::{Entity, UserId};

use crate::ids::GroceryListId;

/// A named grocery list owned by a user.
///
/// Read-only from the reconciler's point of view; it only selects which items
/// are in play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroceryList {
    pub id: GroceryListId,
    pub name: String,
    pub date: NaiveDate,
    pub color: String,
    pub client_id: UserId,
}

impl GroceryList {
    pub fn new(
        id: GroceryListId,
        name: impl Into<String>,
        date: NaiveDate,
        color: impl Into<String>,
        client_id: UserId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            color: color.into(),
            client_id,
        }
    }

    /// The list selected before the user picks one.
    pub fn none() -> Self {
        Self::new(
            GroceryListId::unassigned(),
            "None",
            NaiveDate::MIN,
            "",
            UserId::unassigned(),
        )
    }
}

impl Default for GroceryList {
    fn default() -> Self {
        Self::none()
    }
}

impl Entity for GroceryList {
    type Id = GroceryListId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
