use std::sync::Arc;

use grocery_catalog::{GroceryListId, GroceryListItem, GroceryListItemId};

use crate::error::StoreResult;
use crate::fault::{FaultPlan, Operation};
use crate::table::InMemoryTable;

/// Repository of grocery list items.
///
/// Items are stored without their enriched product; enrichment is the job of
/// [`crate::GroceryListItemsService`].
pub trait ItemStore: Send + Sync {
    fn get_all(&self) -> StoreResult<Vec<GroceryListItem>>;

    /// Items whose owning list is `list_id`, in store order.
    fn get_all_for_list(&self, list_id: GroceryListId) -> StoreResult<Vec<GroceryListItem>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|item| item.belongs_to(list_id))
            .collect())
    }

    fn get(&self, id: GroceryListItemId) -> StoreResult<Option<GroceryListItem>>;

    /// Persist a new item. An unassigned id is replaced by the next free one.
    fn add(&self, item: GroceryListItem) -> StoreResult<GroceryListItem>;

    /// Overwrite a stored item. `None` when the item is not stored.
    fn update(&self, item: &GroceryListItem) -> StoreResult<Option<GroceryListItem>>;

    /// Remove a stored item. `None` when the item is not stored.
    fn delete(&self, item: &GroceryListItem) -> StoreResult<Option<GroceryListItem>>;
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn get_all(&self) -> StoreResult<Vec<GroceryListItem>> {
        (**self).get_all()
    }

    fn get_all_for_list(&self, list_id: GroceryListId) -> StoreResult<Vec<GroceryListItem>> {
        (**self).get_all_for_list(list_id)
    }

    fn get(&self, id: GroceryListItemId) -> StoreResult<Option<GroceryListItem>> {
        (**self).get(id)
    }

    fn add(&self, item: GroceryListItem) -> StoreResult<GroceryListItem> {
        (**self).add(item)
    }

    fn update(&self, item: &GroceryListItem) -> StoreResult<Option<GroceryListItem>> {
        (**self).update(item)
    }

    fn delete(&self, item: &GroceryListItem) -> StoreResult<Option<GroceryListItem>> {
        (**self).delete(item)
    }
}

/// In-memory item store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    table: InMemoryTable<GroceryListItem>,
    faults: FaultPlan,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = GroceryListItem>) -> Self {
        Self {
            table: InMemoryTable::from_rows(items.into_iter().map(GroceryListItem::without_product)),
            faults: FaultPlan::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn faults(&self) -> &FaultPlan {
        &self.faults
    }
}

impl ItemStore for InMemoryItemStore {
    fn get_all(&self) -> StoreResult<Vec<GroceryListItem>> {
        self.faults.check(Operation::Read)?;
        self.table.list()
    }

    fn get_all_for_list(&self, list_id: GroceryListId) -> StoreResult<Vec<GroceryListItem>> {
        self.faults.check(Operation::Read)?;
        self.table.filter(|item| item.belongs_to(list_id))
    }

    fn get(&self, id: GroceryListItemId) -> StoreResult<Option<GroceryListItem>> {
        self.faults.check(Operation::Read)?;
        self.table.get(&id)
    }

    fn add(&self, item: GroceryListItem) -> StoreResult<GroceryListItem> {
        self.faults.check(Operation::Add)?;
        let item = item.without_product();
        if !item.id_typed().is_unassigned() {
            return self.table.insert(item);
        }
        self.table.insert_with(|rows| {
            let next = rows
                .iter()
                .map(GroceryListItem::id_typed)
                .max()
                .unwrap_or_else(GroceryListItemId::unassigned)
                .next();
            item.with_id(next)
        })
    }

    fn update(&self, item: &GroceryListItem) -> StoreResult<Option<GroceryListItem>> {
        self.faults.check(Operation::Update)?;
        self.table.replace(item.clone().without_product())
    }

    fn delete(&self, item: &GroceryListItem) -> StoreResult<Option<GroceryListItem>> {
        self.faults.check(Operation::Delete)?;
        self.table.remove(&item.id_typed())
    }
}
