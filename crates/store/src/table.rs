use std::sync::RwLock;

use grocery_core::Entity;

use crate::error::{StoreError, StoreResult};

/// Insertion-ordered, id-keyed in-memory table.
///
/// Backing storage for the in-memory stores. Listing returns records in the
/// order they were first inserted, which keeps derived views stable.
#[derive(Debug)]
pub struct InMemoryTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> InMemoryTable<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryTable<T>
where
    T: Entity + Clone,
{
    pub fn from_rows(rows: impl IntoIterator<Item = T>) -> Self {
        Self {
            rows: RwLock::new(rows.into_iter().collect()),
        }
    }

    pub fn list(&self) -> StoreResult<Vec<T>> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.clone())
    }

    pub fn filter(&self, mut keep: impl FnMut(&T) -> bool) -> StoreResult<Vec<T>> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.iter().filter(|r| keep(r)).cloned().collect())
    }

    pub fn get(&self, id: &T::Id) -> StoreResult<Option<T>> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.iter().find(|r| r.id() == id).cloned())
    }

    /// Insert a new row; rejects a duplicate id.
    pub fn insert(&self, row: T) -> StoreResult<T> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        if rows.iter().any(|r| r.id() == row.id()) {
            return Err(StoreError::AlreadyExists(format!("{:?}", row.id())));
        }
        rows.push(row.clone());
        Ok(row)
    }

    /// Insert a row after letting `assign` pick its id from the current rows.
    pub fn insert_with(&self, assign: impl FnOnce(&[T]) -> T) -> StoreResult<T> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        let row = assign(&rows);
        if rows.iter().any(|r| r.id() == row.id()) {
            return Err(StoreError::AlreadyExists(format!("{:?}", row.id())));
        }
        rows.push(row.clone());
        Ok(row)
    }

    /// Replace the row with the same id. `None` when no such row exists.
    pub fn replace(&self, row: T) -> StoreResult<Option<T>> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        match rows.iter_mut().find(|r| r.id() == row.id()) {
            Some(slot) => {
                *slot = row.clone();
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    /// Remove the row with `id`, returning it.
    pub fn remove(&self, id: &T::Id) -> StoreResult<Option<T>> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        match rows.iter().position(|r| r.id() == id) {
            Some(idx) => Ok(Some(rows.remove(idx))),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocery_catalog::{Product, ProductId};

    fn product(id: u32, name: &str) -> Product {
        Product::new(ProductId::new(id), name, 1)
    }

    #[test]
    fn list_preserves_insertion_order() {
        let table = InMemoryTable::new();
        table.insert(product(3, "c")).unwrap();
        table.insert(product(1, "a")).unwrap();
        table.insert(product(2, "b")).unwrap();

        let ids: Vec<u32> = table
            .list()
            .unwrap()
            .iter()
            .map(|p| p.id_typed().record().get())
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let table = InMemoryTable::from_rows([product(1, "a")]);
        let err = table.insert(product(1, "again")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn replace_missing_row_returns_none() {
        let table: InMemoryTable<Product> = InMemoryTable::new();
        assert_eq!(table.replace(product(9, "x")).unwrap(), None);
        assert!(table.is_empty());
    }

    #[test]
    fn remove_returns_row() {
        let table = InMemoryTable::from_rows([product(1, "a"), product(2, "b")]);
        let removed = table.remove(&ProductId::new(1)).unwrap().unwrap();
        assert_eq!(removed.name(), "a");
        assert_eq!(table.get(&ProductId::new(1)).unwrap(), None);
        assert_eq!(table.len(), 1);
    }
}
