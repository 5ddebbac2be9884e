//! # Event Bus
//!
//! A small, type-safe, in-process event bus used to propagate relation changes
//! between charm components.
//!
//! Events are identified by their Rust type. Each type gets a topic that
//! supports three delivery routes: broadcast receivers, a latest-value
//! channel, and synchronous observers. Channels are `tokio::sync` primitives,
//! but nothing here requires a running runtime: publishing and observing are
//! synchronous, and receivers can be polled with `try_recv`/`borrow`.
//!
//! # Example
//!
//! ```rust
//! use feast_event_bus::{EventBus, EventBusError};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! #[derive(Debug)]
//! struct RelationBroken { id: u32 }
//!
//! # fn main() -> Result<(), EventBusError> {
//! let bus = EventBus::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//!
//! let counter = Arc::clone(&seen);
//! bus.observe(move |event: &RelationBroken| {
//!     counter.fetch_add(event.id as usize, Ordering::SeqCst);
//! });
//!
//! bus.publish(RelationBroken { id: 7 })?;
//! assert_eq!(seen.load(Ordering::SeqCst), 7);
//! assert_eq!(bus.latest::<RelationBroken>().map(|e| e.id), Some(7));
//! # Ok(())
//! # }
//! ```

mod bus;
mod error;

pub use bus::{Event, EventBus, WeakEventBus};
pub use error::{EventBusError, EventBusErrorExt};
