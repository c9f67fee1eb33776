//! Item reconciler: the state behind a grocery list screen.
//!
//! Holds the selected list, its items (enriched with products) and the set of
//! products that can still be added. Every mutation goes to the stores first
//! and then rebuilds the derived view; nothing is patched incrementally.
//!
//! Failures never escape: a store error is turned into a user-facing message,
//! the in-memory state is kept (or put back) as it was, and the caller gets an
//! [`Outcome::Failed`].
//!
//! Known asymmetries, kept on purpose until product decides otherwise:
//! - increasing/decreasing an amount does not touch product stock; only adding
//!   and removing an item does.
//! - removing an item rebuilds the available set even when the delete failed,
//!   so the product can show as available while its item is still stored.

use tracing::{debug, info, warn};

use grocery_catalog::{GroceryList, GroceryListId, GroceryListItem, GroceryListItemId, Product};
use grocery_events::{EventBus, ReconcilerEvent, Subscription};
use grocery_store::{
    GroceryListItemsService, ItemStore, ProductService, ProductStore, StoreError, StoreResult,
};

use crate::available::{available_products, filter_by_name};
use crate::config::ReconcilerConfig;
use crate::messages;
use crate::share::{CancelSignal, ExportError, ExportSink};

/// Result of a reconciler operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do (absent input or unknown record).
    Skipped,
    /// The change was persisted and the view rebuilt.
    Applied,
    /// The store refused the change; `message` is what the user sees.
    Failed { message: String },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

pub struct ItemReconciler<I, P, B> {
    items_service: GroceryListItemsService<I, P>,
    products: ProductService<P>,
    bus: B,
    config: ReconcilerConfig,
    grocery_list: GroceryList,
    items: Vec<GroceryListItem>,
    available: Vec<Product>,
    message: Option<String>,
}

impl<I, P, B> ItemReconciler<I, P, B>
where
    I: ItemStore,
    P: ProductStore + Clone,
    B: EventBus<ReconcilerEvent>,
{
    /// Build a reconciler with the placeholder "None" list selected and loaded.
    pub fn new(items: I, products: P, bus: B, config: ReconcilerConfig) -> Self {
        let mut reconciler = Self {
            items_service: GroceryListItemsService::new(items, products.clone()),
            products: ProductService::new(products),
            bus,
            config,
            grocery_list: GroceryList::none(),
            items: Vec::new(),
            available: Vec::new(),
            message: None,
        };
        let list_id = reconciler.grocery_list.id;
        reconciler.load(list_id);
        reconciler
    }

    pub fn grocery_list(&self) -> &GroceryList {
        &self.grocery_list
    }

    /// Items of the selected list, in store order.
    pub fn items(&self) -> &[GroceryListItem] {
        &self.items
    }

    pub fn item(&self, id: GroceryListItemId) -> Option<&GroceryListItem> {
        self.items.iter().find(|i| i.id_typed() == id)
    }

    /// The available-products view as last computed (or last searched).
    pub fn available_products(&self) -> &[Product] {
        &self.available
    }

    /// Last user-facing message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    pub fn subscribe(&self) -> Subscription<ReconcilerEvent> {
        self.bus.subscribe()
    }

    /// Select a grocery list and load its items.
    pub fn select_list(&mut self, list: GroceryList) {
        let list_id = list.id;
        info!(list_id = %list_id, name = %list.name, "grocery list selected");
        self.grocery_list = list;
        self.publish(ReconcilerEvent::ListSelected { list_id });
        self.load(list_id);
    }

    /// Replace the item set with the enriched items of `list_id`, then rebuild
    /// the available products.
    pub fn load(&mut self, list_id: GroceryListId) {
        match self.items_service.get_all_on_grocery_list_id(list_id) {
            Ok(items) => self.items = items,
            Err(err) => {
                self.items.clear();
                self.record_failure(messages::load_failed(&err));
            }
        }
        debug!(list_id = %list_id, item_count = self.items.len(), "items loaded");
        self.publish(ReconcilerEvent::ItemsReloaded {
            list_id,
            item_count: self.items.len(),
        });
        self.compute_available();
    }

    /// Rebuild the available products from the product store and the loaded
    /// items.
    pub fn compute_available(&mut self) -> &[Product] {
        let products = match self.products.get_all() {
            Ok(products) => products,
            Err(err) => {
                self.record_failure(messages::load_failed(&err));
                Vec::new()
            }
        };
        self.available = available_products(&products, &self.items);
        self.publish_available();
        &self.available
    }

    /// Put one unit of `product` on the selected list.
    pub fn add_product(&mut self, product: Option<Product>) -> Outcome {
        let Some(product) = product else {
            return Outcome::Skipped;
        };
        let list_id = self.grocery_list.id;

        let mut product = match self.products.get(product.id_typed()) {
            Ok(Some(current)) => current,
            Ok(None) => {
                debug!(product_id = %product.id_typed(), "add skipped: unknown product");
                return Outcome::Skipped;
            }
            Err(err) => return self.fail(messages::add_failed(&err)),
        };
        if let Err(err) = product.take_one() {
            return self.fail(messages::add_failed(&err));
        }

        let item = GroceryListItem::new(
            GroceryListItemId::unassigned(),
            list_id,
            product.id_typed(),
            1,
        );
        let added = match self.items_service.add(item) {
            Ok(added) => added,
            Err(err) => return self.fail(messages::add_failed(&err)),
        };

        if let Err(err) = self.products.update(&product) {
            if let Err(undo) = self.items_service.delete(&added) {
                warn!(item_id = %added.id_typed(), error = %undo, "could not undo item add");
            }
            return self.fail(messages::add_failed(&err));
        }

        info!(
            list_id = %list_id,
            item_id = %added.id_typed(),
            product_id = %product.id_typed(),
            stock = product.stock(),
            "product added to list"
        );
        self.available.retain(|p| p.id_typed() != product.id_typed());
        self.load(list_id);
        Outcome::Applied
    }

    /// Raise the amount of `item` by one. Stock is not touched.
    pub fn increase_amount(&mut self, item: Option<GroceryListItem>) -> Outcome {
        let Some(mut item) = item else {
            return Outcome::Skipped;
        };
        item.increase();
        self.persist_amount(item, |err| messages::increase_failed(err))
    }

    /// Lower the amount of `item` by one; an item at 1 is removed instead.
    pub fn decrease_amount(&mut self, item: Option<GroceryListItem>) -> Outcome {
        let Some(mut item) = item else {
            return Outcome::Skipped;
        };
        if item.amount() <= 1 {
            return self.remove_item(Some(item));
        }
        if let Err(err) = item.decrease() {
            return self.fail(messages::decrease_failed(&err));
        }
        self.persist_amount(item, |err| messages::decrease_failed(err))
    }

    /// Take `item` off the list and give its unit of stock back.
    ///
    /// Stock is restored before the item is deleted; a failed delete undoes
    /// the restore on a best-effort basis. An item the store no longer holds
    /// is dropped from the loaded set without touching stock.
    pub fn remove_item(&mut self, item: Option<GroceryListItem>) -> Outcome {
        let Some(item) = item else {
            return Outcome::Skipped;
        };

        match self.items_service.get(item.id_typed()) {
            Ok(Some(_)) => {}
            Ok(None) => {
                self.drop_stale(&item);
                self.compute_available();
                return Outcome::Skipped;
            }
            Err(err) => {
                let outcome = self.fail(messages::remove_failed(&err));
                self.compute_available();
                return outcome;
            }
        }

        let restored = match self.restore_stock(&item) {
            Ok(restored) => restored,
            Err(err) => {
                let outcome = self.fail(messages::remove_failed(&err));
                self.compute_available();
                return outcome;
            }
        };

        let outcome = match self.items_service.delete(&item) {
            Ok(None) => {
                // Deleted elsewhere between lookup and delete.
                if let Some(product) = restored {
                    self.undo_restore(product);
                }
                self.drop_stale(&item);
                Outcome::Skipped
            }
            Ok(Some(_)) => {
                self.items.retain(|i| i.id_typed() != item.id_typed());
                info!(
                    item_id = %item.id_typed(),
                    product_id = %item.product_id(),
                    "item removed from list"
                );
                self.publish(ReconcilerEvent::ItemRemoved {
                    item_id: item.id_typed(),
                    product_id: item.product_id(),
                });
                Outcome::Applied
            }
            Err(err) => {
                if let Some(product) = restored {
                    self.undo_restore(product);
                }
                self.fail(messages::remove_failed(&err))
            }
        };

        self.compute_available();
        outcome
    }

    /// Available products whose name contains `term` (case-insensitive).
    /// A blank term returns the full available set.
    pub fn search(&mut self, term: &str) -> &[Product] {
        self.compute_available();
        if !term.trim().is_empty() {
            let all = std::mem::take(&mut self.available);
            self.available = filter_by_name(all, term);
            self.publish_available();
        }
        &self.available
    }

    /// Export the current items as JSON through `sink`.
    pub async fn share<S>(&mut self, sink: &S, cancel: &CancelSignal) -> Outcome
    where
        S: ExportSink + ?Sized,
    {
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(err) => return self.fail(messages::save_failed(ExportError::from(err))),
        };
        let file_name = self.config.export_file_name.clone();

        match sink.save_file(&file_name, &json, cancel).await {
            Ok(()) => {
                info!(
                    list_id = %self.grocery_list.id,
                    file_name = %file_name,
                    item_count = self.items.len(),
                    "grocery list shared"
                );
                self.set_message(messages::LIST_SAVED.to_string());
                self.publish(ReconcilerEvent::ListShared {
                    list_id: self.grocery_list.id,
                    file_name,
                });
                Outcome::Applied
            }
            Err(err) => self.fail(messages::save_failed(&err)),
        }
    }

    fn persist_amount(
        &mut self,
        item: GroceryListItem,
        failure: impl FnOnce(&StoreError) -> String,
    ) -> Outcome {
        match self.items_service.update(&item) {
            Ok(Some(_)) => {
                if let Some(loaded) = self.items.iter_mut().find(|i| i.id_typed() == item.id_typed()) {
                    loaded.set_amount(item.amount());
                }
                debug!(item_id = %item.id_typed(), amount = item.amount(), "amount persisted");
                self.publish(ReconcilerEvent::AmountChanged {
                    item_id: item.id_typed(),
                    amount: item.amount(),
                });
                Outcome::Applied
            }
            Ok(None) => {
                debug!(item_id = %item.id_typed(), "amount change skipped: item not stored");
                Outcome::Skipped
            }
            // The loaded item was never changed, so the view already shows the
            // previous amount.
            Err(err) => self.fail(failure(&err)),
        }
    }

    fn drop_stale(&mut self, item: &GroceryListItem) {
        debug!(item_id = %item.id_typed(), "remove skipped: item not stored");
        self.items.retain(|i| i.id_typed() != item.id_typed());
    }

    /// Give one unit back to the item's product. `Ok(None)` when the product
    /// is unknown to the store.
    fn restore_stock(&self, item: &GroceryListItem) -> StoreResult<Option<Product>> {
        let Some(mut product) = self.products.get(item.product_id())? else {
            return Ok(None);
        };
        product.restore_one();
        Ok(self.products.update(&product)?.map(|_| product))
    }

    fn undo_restore(&self, mut product: Product) {
        if product.take_one().is_err() {
            return;
        }
        if let Err(err) = self.products.update(&product) {
            warn!(
                product_id = %product.id_typed(),
                error = %err,
                "could not revert stock after failed delete"
            );
        }
    }

    fn fail(&mut self, message: String) -> Outcome {
        self.record_failure(message.clone());
        Outcome::Failed { message }
    }

    fn record_failure(&mut self, message: String) {
        warn!(list_id = %self.grocery_list.id, %message, "grocery list operation failed");
        self.set_message(message);
    }

    fn set_message(&mut self, message: String) {
        self.message = Some(message.clone());
        self.publish(ReconcilerEvent::MessageChanged { message });
    }

    fn publish_available(&self) {
        self.publish(ReconcilerEvent::AvailableProductsChanged {
            product_ids: self.available.iter().map(Product::id_typed).collect(),
        });
    }

    fn publish(&self, event: ReconcilerEvent) {
        let event_type = event.event_type();
        if let Err(err) = self.bus.publish(event) {
            warn!(event_type, error = ?err, "failed to publish reconciler event");
        }
    }
}
