//! Service layer over the stores.
//!
//! Items are returned enriched with their product. A dangling product
//! reference never fails a read: the item carries [`Product::placeholder`]
//! instead.

use tracing::debug;

use grocery_catalog::{GroceryListId, GroceryListItem, GroceryListItemId, Product, ProductId};

use crate::error::StoreResult;
use crate::item_store::ItemStore;
use crate::product_store::ProductStore;

/// Grocery list item service: CRUD over an [`ItemStore`] plus enrichment.
#[derive(Debug, Clone)]
pub struct GroceryListItemsService<I, P> {
    items: I,
    products: P,
}

impl<I, P> GroceryListItemsService<I, P>
where
    I: ItemStore,
    P: ProductStore,
{
    pub fn new(items: I, products: P) -> Self {
        Self { items, products }
    }

    pub fn get_all(&self) -> StoreResult<Vec<GroceryListItem>> {
        let items = self.items.get_all()?;
        self.enrich_all(items)
    }

    pub fn get_all_on_grocery_list_id(
        &self,
        list_id: GroceryListId,
    ) -> StoreResult<Vec<GroceryListItem>> {
        let items = self.items.get_all_for_list(list_id)?;
        self.enrich_all(items)
    }

    pub fn get(&self, id: GroceryListItemId) -> StoreResult<Option<GroceryListItem>> {
        match self.items.get(id)? {
            Some(item) => Ok(Some(self.enrich(item)?)),
            None => Ok(None),
        }
    }

    pub fn add(&self, item: GroceryListItem) -> StoreResult<GroceryListItem> {
        self.items.add(item)
    }

    pub fn update(&self, item: &GroceryListItem) -> StoreResult<Option<GroceryListItem>> {
        self.items.update(item)
    }

    pub fn delete(&self, item: &GroceryListItem) -> StoreResult<Option<GroceryListItem>> {
        self.items.delete(item)
    }

    /// Look the item up first; an unknown id is `Ok(None)`.
    pub fn delete_by_id(&self, id: GroceryListItemId) -> StoreResult<Option<GroceryListItem>> {
        match self.items.get(id)? {
            Some(item) => self.items.delete(&item),
            None => Ok(None),
        }
    }

    fn enrich_all(&self, items: Vec<GroceryListItem>) -> StoreResult<Vec<GroceryListItem>> {
        items.into_iter().map(|item| self.enrich(item)).collect()
    }

    fn enrich(&self, item: GroceryListItem) -> StoreResult<GroceryListItem> {
        let product = match self.products.get(item.product_id())? {
            Some(product) => product,
            None => {
                debug!(
                    item_id = %item.id_typed(),
                    product_id = %item.product_id(),
                    "item references unknown product; using placeholder"
                );
                Product::placeholder()
            }
        };
        Ok(item.with_product(product))
    }
}

/// Product service: read + update over a [`ProductStore`].
#[derive(Debug, Clone)]
pub struct ProductService<P> {
    products: P,
}

impl<P> ProductService<P>
where
    P: ProductStore,
{
    pub fn new(products: P) -> Self {
        Self { products }
    }

    pub fn get_all(&self) -> StoreResult<Vec<Product>> {
        self.products.get_all()
    }

    pub fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
        self.products.get(id)
    }

    pub fn update(&self, product: &Product) -> StoreResult<Option<Product>> {
        self.products.update(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::item_store::InMemoryItemStore;
    use crate::product_store::InMemoryProductStore;

    fn item(id: u32, list: u32, product: u32, amount: u32) -> GroceryListItem {
        GroceryListItem::new(
            GroceryListItemId::new(id),
            GroceryListId::new(list),
            ProductId::new(product),
            amount,
        )
    }

    fn service(
        items: Vec<GroceryListItem>,
        products: Vec<Product>,
    ) -> GroceryListItemsService<Arc<InMemoryItemStore>, Arc<InMemoryProductStore>> {
        GroceryListItemsService::new(
            InMemoryItemStore::with_items(items).arc(),
            InMemoryProductStore::with_products(products).arc(),
        )
    }

    #[test]
    fn list_items_are_enriched_with_product() {
        let svc = service(
            vec![item(1, 1, 1, 2), item(2, 2, 1, 1)],
            vec![Product::new(ProductId::new(1), "Milk", 3)],
        );

        let items = svc.get_all_on_grocery_list_id(GroceryListId::new(1)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product().name(), "Milk");
    }

    #[test]
    fn missing_product_becomes_placeholder() {
        let svc = service(vec![item(1, 1, 99, 1)], vec![]);
        let items = svc.get_all().unwrap();
        assert!(items[0].product().is_placeholder());
    }

    #[test]
    fn get_enriches_single_item() {
        let svc = service(
            vec![item(5, 1, 2, 1)],
            vec![Product::new(ProductId::new(2), "Bread", 1)],
        );
        let found = svc.get(GroceryListItemId::new(5)).unwrap().unwrap();
        assert_eq!(found.product().name(), "Bread");
        assert_eq!(svc.get(GroceryListItemId::new(6)).unwrap(), None);
    }

    #[test]
    fn delete_by_id_removes_known_item_only() {
        let svc = service(vec![item(5, 1, 2, 1)], vec![]);
        assert_eq!(svc.delete_by_id(GroceryListItemId::new(6)).unwrap(), None);
        assert!(svc.delete_by_id(GroceryListItemId::new(5)).unwrap().is_some());
        assert!(svc.get_all().unwrap().is_empty());
    }
}
