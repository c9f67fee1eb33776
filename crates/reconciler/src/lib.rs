//! Grocery list reconciliation.
//!
//! [`ItemReconciler`] keeps the items of the selected grocery list, product
//! stock, and the derived set of addable products consistent across add,
//! increase, decrease and remove. List sharing hands a JSON snapshot of the
//! items to an [`ExportSink`].

pub mod available;
pub mod config;
pub mod messages;
pub mod reconciler;
pub mod share;

pub use available::{available_products, filter_by_name};
pub use config::ReconcilerConfig;
pub use reconciler::{ItemReconciler, Outcome};
pub use share::{
    CancelSignal, CancellationSource, ExportError, ExportSink, FileExportSink, MemoryExportSink,
};
