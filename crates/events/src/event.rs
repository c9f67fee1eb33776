use serde::{Deserialize, Serialize};

use grocery_catalog::{GroceryListId, GroceryListItemId, ProductId};

/// Something observable changed in the reconciler state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReconcilerEvent {
    /// A different grocery list was selected.
    ListSelected { list_id: GroceryListId },

    /// The full item set was reloaded from the store.
    ItemsReloaded { list_id: GroceryListId, item_count: usize },

    /// The available-products view was rebuilt (or filtered by a search).
    AvailableProductsChanged { product_ids: Vec<ProductId> },

    /// An item's amount was persisted with a new value.
    AmountChanged { item_id: GroceryListItemId, amount: u32 },

    /// An item left the list.
    ItemRemoved { item_id: GroceryListItemId, product_id: ProductId },

    /// The user-facing message changed.
    MessageChanged { message: String },

    /// The item snapshot was handed to the export sink.
    ListShared { list_id: GroceryListId, file_name: String },
}

impl ReconcilerEvent {
    /// Stable, dotted name for logs and routing.
    pub fn event_type(&self) -> &'static str {
        match self {
            ReconcilerEvent::ListSelected { .. } => "grocery.list.selected",
            ReconcilerEvent::ItemsReloaded { .. } => "grocery.items.reloaded",
            ReconcilerEvent::AvailableProductsChanged { .. } => "grocery.available.changed",
            ReconcilerEvent::AmountChanged { .. } => "grocery.item.amount_changed",
            ReconcilerEvent::ItemRemoved { .. } => "grocery.item.removed",
            ReconcilerEvent::MessageChanged { .. } => "grocery.message.changed",
            ReconcilerEvent::ListShared { .. } => "grocery.list.shared",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = ReconcilerEvent::AmountChanged {
            item_id: GroceryListItemId::new(8),
            amount: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "amount_changed");
        assert_eq!(json["item_id"], 8);
        assert_eq!(json["amount"], 3);
    }

    #[test]
    fn event_types_are_namespaced() {
        let event = ReconcilerEvent::MessageChanged { message: "x".into() };
        assert!(event.event_type().starts_with("grocery."));
    }
}
