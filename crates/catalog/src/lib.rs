//! Grocery catalog domain models.
//!
//! Products with stock, grocery lists, and the items that put a product on a
//! list. Pure data + invariant-preserving state transitions (no IO).

pub mod ids;
pub mod item;
pub mod list;
pub mod product;

pub use ids::{GroceryListId, GroceryListItemId, ProductId};
pub use item::GroceryListItem;
pub use list::GroceryList;
pub use product::Product;
