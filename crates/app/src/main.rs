//! Demo session: seed in-memory stores, edit a list, share it.

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;

use grocery_catalog::{GroceryList, GroceryListId, GroceryListItem, GroceryListItemId, Product, ProductId};
use grocery_core::UserId;
use grocery_events::{EventBus, InMemoryEventBus, ReconcilerEvent};
use grocery_reconciler::{CancellationSource, FileExportSink, ItemReconciler, Outcome, ReconcilerConfig};
use grocery_store::{InMemoryItemStore, InMemoryProductStore};

fn seed_products() -> Vec<Product> {
    vec![
        Product::new(ProductId::new(1), "Melk", 300),
        Product::new(ProductId::new(2), "Kaas", 100),
        Product::new(ProductId::new(3), "Brood", 400),
        Product::new(ProductId::new(4), "Cornflakes", 0),
    ]
}

fn seed_items() -> Vec<GroceryListItem> {
    vec![
        GroceryListItem::new(GroceryListItemId::new(1), GroceryListId::new(1), ProductId::new(1), 3),
        GroceryListItem::new(GroceryListItemId::new(2), GroceryListId::new(1), ProductId::new(2), 1),
        GroceryListItem::new(GroceryListItemId::new(3), GroceryListId::new(2), ProductId::new(3), 4),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grocery_observability::init();

    let config = ReconcilerConfig::from_env();
    tokio::fs::create_dir_all(&config.export_dir)
        .await
        .with_context(|| format!("failed to create export directory {:?}", config.export_dir))?;

    let bus: Arc<InMemoryEventBus<ReconcilerEvent>> = Arc::new(InMemoryEventBus::new());
    let events = bus.subscribe();
    let sink = FileExportSink::new(&config.export_dir);

    let mut reconciler = ItemReconciler::new(
        InMemoryItemStore::with_items(seed_items()).arc(),
        InMemoryProductStore::with_products(seed_products()).arc(),
        bus,
        config,
    );

    let date = NaiveDate::from_ymd_opt(2024, 12, 14).context("invalid list date")?;
    reconciler.select_list(GroceryList::new(
        GroceryListId::new(1),
        "Boodschappen familieweekend",
        date,
        "#FF6A00",
        UserId::new(1),
    ));

    let bread = reconciler.search("bro").first().cloned();
    report("add bread", reconciler.add_product(bread));

    let cheese = reconciler.items().iter().find(|i| i.product().name() == "Kaas").cloned();
    report("increase cheese", reconciler.increase_amount(cheese));

    let milk = reconciler.items().iter().find(|i| i.product().name() == "Melk").cloned();
    report("decrease milk", reconciler.decrease_amount(milk));

    let cancel = CancellationSource::new();
    report("share", reconciler.share(&sink, &cancel.signal()).await);

    for event in events.drain() {
        tracing::debug!(event_type = event.event_type(), ?event, "reconciler event");
    }

    tracing::info!(
        items = reconciler.items().len(),
        available = reconciler.available_products().len(),
        message = reconciler.message().unwrap_or_default(),
        "session finished"
    );
    Ok(())
}

fn report(action: &str, outcome: Outcome) {
    match outcome {
        Outcome::Applied => tracing::info!(action, "applied"),
        Outcome::Skipped => tracing::info!(action, "skipped"),
        Outcome::Failed { message } => tracing::warn!(action, %message, "failed"),
    }
}
