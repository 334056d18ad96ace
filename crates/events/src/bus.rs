//! Notification publishing/subscription abstraction (mechanics only).
//!
//! This module provides the pub/sub mechanism used to propagate session
//! changes through the application: the identity provider publishes
//! `SessionChange` notifications, the auth state observer consumes them and
//! in turn publishes resolved `AuthState` transitions to shell components.
//!
//! ## Design
//!
//! - **Transport-agnostic**: the trait works with in-memory channels or any
//!   SDK callback bridge.
//! - **In-order per publisher**: a subscriber receives one publisher's
//!   notifications in emission order. The observer depends on this — each
//!   notification is fully reconciled before the next one is looked at.
//! - **Broadcast semantics**: each subscriber gets a copy of every
//!   notification published after it subscribed.
//! - **No persistence**: the bus distributes; the session store is the only
//!   durable state.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to a notification stream.
///
/// Designed for single-threaded, cooperative consumption: the owner drains
/// it with `try_recv` between UI turns (or blocks with `recv` in tests).
/// Dropping the subscription detaches it; the bus prunes dead subscribers
/// on the next publish.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next notification is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a notification without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a notification.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic notification bus (pub/sub abstraction).
///
/// `publish()` can fail (e.g. a poisoned internal lock). Failures are
/// surfaced to the caller; since the session store — not the bus — is the
/// durable truth, re-publishing after a failure is safe.
pub trait NotificationBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> NotificationBus<M> for Arc<B>
where
    B: NotificationBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
