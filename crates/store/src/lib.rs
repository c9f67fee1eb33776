//! Storage abstractions for grocery list items and products.
//!
//! - [`ItemStore`] / [`ProductStore`]: key-based repositories, synchronous,
//!   one record at a time, no transactions.
//! - In-memory implementations for tests/dev, with fault injection.
//! - [`GroceryListItemsService`] / [`ProductService`]: the thin service layer
//!   that enriches items with their product on read.

pub mod error;
pub mod fault;
pub mod item_store;
pub mod product_store;
pub mod services;
pub mod table;

pub use error::{StoreError, StoreResult};
pub use fault::{FaultPlan, Operation};
pub use item_store::{InMemoryItemStore, ItemStore};
pub use product_store::{InMemoryProductStore, ProductStore};
pub use services::{GroceryListItemsService, ProductService};
pub use table::InMemoryTable;
