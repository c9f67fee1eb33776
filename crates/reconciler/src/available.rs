//! Derived view: products that can still be added to a list.
//!
//! A product is available iff no item on the list references it and it has
//! stock left. Always rebuilt from scratch; input order is preserved.

use std::collections::HashSet;

use grocery_catalog::{GroceryListItem, Product, ProductId};

pub fn available_products(products: &[Product], items: &[GroceryListItem]) -> Vec<Product> {
    let on_list: HashSet<ProductId> = items.iter().map(GroceryListItem::product_id).collect();
    products
        .iter()
        .filter(|p| p.in_stock() && !on_list.contains(&p.id_typed()))
        .cloned()
        .collect()
}

/// Case-insensitive name filter. A blank term keeps everything.
pub fn filter_by_name(products: Vec<Product>, term: &str) -> Vec<Product> {
    let term = term.trim();
    if term.is_empty() {
        return products;
    }
    products.into_iter().filter(|p| p.name_contains(term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocery_catalog::{GroceryListId, GroceryListItemId};
    use proptest::prelude::*;

    fn product(id: u32, name: &str, stock: u32) -> Product {
        Product::new(ProductId::new(id), name, stock)
    }

    fn item_for(product: u32) -> GroceryListItem {
        GroceryListItem::new(
            GroceryListItemId::new(product),
            GroceryListId::new(1),
            ProductId::new(product),
            1,
        )
    }

    #[test]
    fn excludes_listed_and_out_of_stock_products() {
        let products = vec![product(1, "Milk", 3), product(2, "Bread", 0), product(3, "Eggs", 1)];
        let items = vec![item_for(1)];

        let names: Vec<_> = available_products(&products, &items)
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Eggs"]);
    }

    #[test]
    fn empty_list_offers_everything_in_stock() {
        let products = vec![product(1, "Milk", 3), product(2, "Bread", 2)];
        assert_eq!(available_products(&products, &[]), products);
    }

    #[test]
    fn filter_matches_substring_ignoring_case() {
        let products = vec![product(1, "Milk", 3), product(2, "Buttermilk", 1), product(3, "Eggs", 1)];
        let found = filter_by_name(products, "MILK");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn blank_term_keeps_all() {
        let products = vec![product(1, "Milk", 3)];
        assert_eq!(filter_by_name(products.clone(), "   "), products);
        assert_eq!(filter_by_name(products.clone(), ""), products);
    }

    fn catalog() -> impl Strategy<Value = (Vec<Product>, Vec<GroceryListItem>)> {
        proptest::collection::vec(("[a-z]{1,8}", 0u32..4, any::<bool>()), 0..20).prop_map(|rows| {
            let mut products = Vec::new();
            let mut items = Vec::new();
            for (idx, (name, stock, listed)) in rows.into_iter().enumerate() {
                let id = idx as u32 + 1;
                products.push(product(id, &name, stock));
                if listed {
                    items.push(item_for(id));
                }
            }
            (products, items)
        })
    }

    proptest! {
        /// Property: membership is exactly "in stock and not on the list".
        #[test]
        fn membership_matches_definition((products, items) in catalog()) {
            let available = available_products(&products, &items);
            for p in &products {
                let listed = items.iter().any(|i| i.product_id() == p.id_typed());
                let expected = p.stock() > 0 && !listed;
                prop_assert_eq!(available.contains(p), expected);
            }
        }

        /// Property: search results are the available products whose name contains the term.
        #[test]
        fn search_is_subset_of_available((products, items) in catalog(), term in "[a-zA-Z]{0,3}") {
            let available = available_products(&products, &items);
            let found = filter_by_name(available.clone(), &term);
            for p in &found {
                prop_assert!(available.contains(p));
                prop_assert!(p.name().to_lowercase().contains(&term.to_lowercase()));
            }
            let expected = available.iter().filter(|p| p.name_contains(&term)).count();
            prop_assert_eq!(found.len(), expected);
        }
    }
}
