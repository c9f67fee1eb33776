use serde::{Deserialize, Serialize};

use grocery_core::{DomainError, DomainResult, Entity};

use crate::ids::ProductId;

/// A product that can be put on a grocery list.
///
/// `stock` is the number of units not yet claimed by any list item. It only
/// moves through [`Product::take_one`] and [`Product::restore_one`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    id: ProductId,
    name: String,
    stock: u32,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            stock,
        }
    }

    /// Stand-in used when an item references a product that no longer exists.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_unassigned()
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Case-insensitive containment test on the product name.
    pub fn name_contains(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }

    /// Claim one unit of stock for a list item.
    pub fn take_one(&mut self) -> DomainResult<()> {
        if self.stock == 0 {
            return Err(DomainError::invariant(format!(
                "product {} ({}) is out of stock",
                self.id, self.name
            )));
        }
        self.stock -= 1;
        Ok(())
    }

    /// Return one unit of stock (item removed from a list).
    pub fn restore_one(&mut self) {
        self.stock = self.stock.saturating_add(1);
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_one_decrements_stock() {
        let mut milk = Product::new(ProductId::new(1), "Milk", 3);
        milk.take_one().unwrap();
        assert_eq!(milk.stock(), 2);
    }

    #[test]
    fn take_one_rejects_empty_stock() {
        let mut milk = Product::new(ProductId::new(1), "Milk", 0);
        let err = milk.take_one().unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => assert!(msg.contains("out of stock")),
            _ => panic!("Expected InvariantViolation for empty stock"),
        }
        assert_eq!(milk.stock(), 0);
    }

    #[test]
    fn restore_after_take_is_identity() {
        let mut bread = Product::new(ProductId::new(2), "Bread", 1);
        bread.take_one().unwrap();
        bread.restore_one();
        assert_eq!(bread.stock(), 1);
    }

    #[test]
    fn placeholder_is_empty() {
        let p = Product::placeholder();
        assert!(p.is_placeholder());
        assert_eq!(p.name(), "");
        assert_eq!(p.stock(), 0);
        assert!(!p.in_stock());
    }

    #[test]
    fn name_contains_ignores_case() {
        let p = Product::new(ProductId::new(4), "Cornflakes", 5);
        assert!(p.name_contains("FLAKE"));
        assert!(p.name_contains("corn"));
        assert!(!p.name_contains("milk"));
    }

    #[test]
    fn serializes_with_pascal_case_fields() {
        let json = serde_json::to_value(Product::new(ProductId::new(1), "Milk", 3)).unwrap();
        assert_eq!(json["Id"], 1);
        assert_eq!(json["Name"], "Milk");
        assert_eq!(json["Stock"], 3);
    }
}
