use std::sync::Arc;

use grocery_catalog::{Product, ProductId};

use crate::error::StoreResult;
use crate::fault::{FaultPlan, Operation};
use crate::table::InMemoryTable;

/// Repository of products.
pub trait ProductStore: Send + Sync {
    fn get_all(&self) -> StoreResult<Vec<Product>>;

    fn get(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// Overwrite a stored product. `None` when the product is not stored.
    fn update(&self, product: &Product) -> StoreResult<Option<Product>>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn get_all(&self) -> StoreResult<Vec<Product>> {
        (**self).get_all()
    }

    fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
        (**self).get(id)
    }

    fn update(&self, product: &Product) -> StoreResult<Option<Product>> {
        (**self).update(product)
    }
}

/// In-memory product store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    table: InMemoryTable<Product>,
    faults: FaultPlan,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            table: InMemoryTable::from_rows(products),
            faults: FaultPlan::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn faults(&self) -> &FaultPlan {
        &self.faults
    }

    /// Seed a product (catalog maintenance is outside the reconciler).
    pub fn insert(&self, product: Product) -> StoreResult<Product> {
        self.table.insert(product)
    }
}

impl ProductStore for InMemoryProductStore {
    fn get_all(&self) -> StoreResult<Vec<Product>> {
        self.faults.check(Operation::Read)?;
        self.table.list()
    }

    fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
        self.faults.check(Operation::Read)?;
        self.table.get(&id)
    }

    fn update(&self, product: &Product) -> StoreResult<Option<Product>> {
        self.faults.check(Operation::Update)?;
        self.table.replace(product.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_overwrites_stock() {
        let store = InMemoryProductStore::with_products([Product::new(ProductId::new(1), "Milk", 3)]);
        let mut milk = store.get(ProductId::new(1)).unwrap().unwrap();
        milk.take_one().unwrap();
        store.update(&milk).unwrap();
        assert_eq!(store.get(ProductId::new(1)).unwrap().unwrap().stock(), 2);
    }

    #[test]
    fn update_unknown_product_returns_none() {
        let store = InMemoryProductStore::new();
        let ghost = Product::new(ProductId::new(42), "Ghost", 1);
        assert_eq!(store.update(&ghost).unwrap(), None);
    }

    #[test]
    fn insert_seeds_catalog() {
        let store = InMemoryProductStore::new();
        store.insert(Product::new(ProductId::new(1), "Milk", 3)).unwrap();
        assert_eq!(store.get_all().unwrap().len(), 1);
    }
}
