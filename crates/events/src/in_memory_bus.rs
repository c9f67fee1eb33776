//! In-process buses.

use std::sync::{Mutex, mpsc};

use thiserror::Error;

use crate::bus::{EventBus, Subscription};

#[derive(Debug, Error)]
pub enum InMemoryBusError {
    /// The subscriber list lock was poisoned.
    #[error("subscriber list poisoned")]
    Poisoned,
}

/// Fan-out bus over std channels. No IO, no async.
#[derive(Debug)]
pub struct InMemoryEventBus<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut subs = self.subscribers.lock().map_err(|_| InMemoryBusError::Poisoned)?;
        // Dropped subscriptions fall out here.
        subs.retain(|tx| tx.send(message.clone()).is_ok());
        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        Subscription::new(rx)
    }
}

/// Bus that discards everything. For callers that only read return values.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBus;

impl<M> EventBus<M> for NullBus
where
    M: Send + 'static,
{
    type Error = core::convert::Infallible;

    fn publish(&self, _message: M) -> Result<(), Self::Error> {
        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (_tx, rx) = mpsc::channel();
        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_sees_every_message() {
        let bus = InMemoryEventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(1u32).unwrap();
        bus.publish(2u32).unwrap();

        assert_eq!(a.drain(), vec![1, 2]);
        assert_eq!(b.drain(), vec![1, 2]);
        assert_eq!(a.try_next(), None);
    }

    #[test]
    fn late_subscriber_misses_earlier_messages() {
        let bus = InMemoryEventBus::new();
        bus.publish("early").unwrap();
        let sub = bus.subscribe();
        bus.publish("late").unwrap();
        assert_eq!(sub.drain(), vec!["late"]);
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let bus = InMemoryEventBus::new();
        let sub = bus.subscribe();
        drop(sub);
        bus.publish(7u8).unwrap();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn null_bus_accepts_and_drops() {
        let bus = NullBus;
        let sub = EventBus::<u8>::subscribe(&bus);
        bus.publish(1u8).unwrap();
        assert_eq!(sub.drain(), Vec::<u8>::new());
    }
}
