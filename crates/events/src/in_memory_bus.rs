//! In-memory notification bus for tests/dev.

use std::sync::{Mutex, mpsc};

use crate::bus::{NotificationBus, Subscription};

#[derive(Debug)]
pub enum InMemoryBusError {
    /// Publish failed due to internal lock poisoning.
    Poisoned,
}

/// In-memory pub/sub bus.
///
/// - No IO / no async
/// - Best-effort fan-out, in publish order
/// - Dead subscribers are pruned on publish
#[derive(Debug)]
pub struct InMemoryBus<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> InMemoryBus<M> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> Default for InMemoryBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M: Clone> InMemoryBus<M> {
    /// Subscribe with an optional seed notification delivered first.
    ///
    /// The identity provider uses this to replay the current principal state
    /// to a new subscriber before any live transitions, so a late subscriber
    /// still resolves `Unknown` without waiting for the next real change.
    pub fn subscribe_seeded(&self, seed: Option<M>) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        if let Some(message) = seed {
            // The receiver is still local; this cannot fail.
            let _ = tx.send(message);
        }

        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

impl<M> NotificationBus<M> for InMemoryBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut subs = self.subscribers.lock().map_err(|_| InMemoryBusError::Poisoned)?;

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(message.clone()).is_ok());

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive messages until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcasts_to_all_subscribers_in_order() {
        let bus: InMemoryBus<u32> = InMemoryBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(1).unwrap();
        bus.publish(2).unwrap();

        assert_eq!(a.try_recv().unwrap(), 1);
        assert_eq!(a.try_recv().unwrap(), 2);
        assert_eq!(b.try_recv().unwrap(), 1);
        assert_eq!(b.try_recv().unwrap(), 2);
    }

    #[test]
    fn seeded_subscription_sees_seed_before_live_messages() {
        let bus: InMemoryBus<&'static str> = InMemoryBus::new();
        let sub = bus.subscribe_seeded(Some("replayed"));

        bus.publish("live").unwrap();

        assert_eq!(sub.try_recv().unwrap(), "replayed");
        assert_eq!(sub.try_recv().unwrap(), "live");
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let bus: InMemoryBus<u32> = InMemoryBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        drop(a);

        bus.publish(7).unwrap();

        assert_eq!(b.try_recv().unwrap(), 7);
    }

    #[test]
    fn subscriber_only_sees_messages_after_subscribing() {
        let bus: InMemoryBus<u32> = InMemoryBus::new();
        bus.publish(1).unwrap();

        let late = bus.subscribe();
        bus.publish(2).unwrap();

        assert_eq!(late.try_recv().unwrap(), 2);
        assert!(late.try_recv().is_err());
    }
}
