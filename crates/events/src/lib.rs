//! `planboard-events` — notification fan-out mechanics.
//!
//! Transport for session-change notifications (identity provider → observer)
//! and auth-state transitions (observer → shell components). Mechanics only;
//! the notification payloads live in the crates that own them.

pub mod bus;
pub mod in_memory_bus;

pub use bus::{NotificationBus, Subscription};
pub use in_memory_bus::{InMemoryBus, InMemoryBusError};
