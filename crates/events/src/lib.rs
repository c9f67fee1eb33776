//! Change notifications published by the reconciler.
//!
//! Callers observe state changes by subscribing to an [`EventBus`] instead of
//! binding to mutable properties.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::ReconcilerEvent;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus, NullBus};
