use serde::{Deserialize, Serialize};

use grocery_core::{DomainError, DomainResult, Entity};

use crate::ids::{GroceryListId, GroceryListItemId, ProductId};
use crate::product::Product;

/// A (list, product, amount) association.
///
/// `amount` never drops below 1; an item that would reach 0 is removed
/// instead. `product` is filled in on read and is not part of the stored
/// record (stores keep it as [`Product::placeholder`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroceryListItem {
    id: GroceryListItemId,
    grocery_list_id: GroceryListId,
    product_id: ProductId,
    amount: u32,
    #[serde(default)]
    product: Product,
}

impl GroceryListItem {
    /// Build an item. `amount` is clamped to at least 1.
    pub fn new(
        id: GroceryListItemId,
        grocery_list_id: GroceryListId,
        product_id: ProductId,
        amount: u32,
    ) -> Self {
        Self {
            id,
            grocery_list_id,
            product_id,
            amount: amount.max(1),
            product: Product::placeholder(),
        }
    }

    pub fn id_typed(&self) -> GroceryListItemId {
        self.id
    }

    pub fn grocery_list_id(&self) -> GroceryListId {
        self.grocery_list_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn belongs_to(&self, list_id: GroceryListId) -> bool {
        self.grocery_list_id == list_id
    }

    /// Assign the store-generated identifier.
    pub fn with_id(mut self, id: GroceryListItemId) -> Self {
        self.id = id;
        self
    }

    /// Attach the enriched product reference.
    pub fn with_product(mut self, product: Product) -> Self {
        self.product = product;
        self
    }

    /// Drop the enriched product reference (storage form).
    pub fn without_product(mut self) -> Self {
        self.product = Product::placeholder();
        self
    }

    pub fn increase(&mut self) {
        self.amount = self.amount.saturating_add(1);
    }

    /// Lower the amount by one. Refuses to go below 1.
    pub fn decrease(&mut self) -> DomainResult<()> {
        if self.amount <= 1 {
            return Err(DomainError::invariant(format!(
                "amount of item {} cannot drop below 1",
                self.id
            )));
        }
        self.amount -= 1;
        Ok(())
    }

    /// Overwrite the amount with a value read back from the store.
    pub fn set_amount(&mut self, amount: u32) {
        self.amount = amount.max(1);
    }
}

impl Entity for GroceryListItem {
    type Id = GroceryListItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
