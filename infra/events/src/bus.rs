use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::{Arc, Weak};
use tokio::sync::{broadcast, watch};
use tracing::trace;

/// Buffer size for broadcast subscribers created with [`EventBus::subscribe`].
const DEFAULT_CAPACITY: usize = 64;

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

type Observer = Arc<dyn Fn(&dyn Any) + Send + Sync>;
type Slot = Box<dyn Any + Send + Sync>;

/// Every delivery route registered for one event type.
#[derive(Default)]
struct Topic {
    broadcast: Option<Slot>,
    latest: Option<Slot>,
    observers: Vec<Observer>,
}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topic")
            .field("broadcast", &self.broadcast.is_some())
            .field("latest", &self.latest.is_some())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Topic {
    fn broadcast<T: Event>(&self) -> Result<Option<broadcast::Sender<Arc<T>>>, EventBusError> {
        self.broadcast.as_ref().map(downcast::<T, broadcast::Sender<Arc<T>>>).transpose()
    }

    fn latest<T: Event>(&self) -> Result<Option<watch::Sender<Arc<T>>>, EventBusError> {
        self.latest.as_ref().map(downcast::<T, watch::Sender<Arc<T>>>).transpose()
    }
}

fn downcast<T: Event, S: Clone + 'static>(slot: &Slot) -> Result<S, EventBusError> {
    slot.downcast_ref::<S>().cloned().ok_or_else(|| EventBusError::TypeMismatch {
        message: type_name::<T>().into(),
        context: Some("Unexpected channel type in topic".into()),
    })
}

/// A thread-safe, type-indexed event bus.
///
/// Each event type owns one topic which can be consumed three ways:
/// * **broadcast** receivers ([`EventBus::subscribe`]) get every event published
///   after they subscribed;
/// * **latest-value** receivers ([`EventBus::watch`]) always see the most recent
///   event, which suits level-triggered consumers that re-read full state;
/// * **observers** ([`EventBus::observe`]) are invoked synchronously, in
///   registration order, before [`EventBus::publish`] returns.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    topics: Arc<RwLock<FxHashMap<TypeId, Topic>>>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to every future event of type `T`.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the topic registry is corrupted.
    ///
    /// # Examples
    /// ```rust
    /// use feast_event_bus::EventBus;
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Ping(u8);
    ///
    /// # fn main() -> Result<(), feast_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let mut rx = bus.subscribe::<Ping>()?;
    /// bus.publish(Ping(1))?;
    /// assert_eq!(rx.try_recv().map(|p| p.0), Ok(1));
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes with an explicit buffer capacity.
    ///
    /// The capacity only applies when this call creates the broadcast channel;
    /// later subscribers share the existing buffer.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidCapacity`] if `capacity` is zero.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity {
                message: "capacity must be greater than zero".into(),
                context: Some(type_name::<T>().into()),
            });
        }

        let mut topics = self.topics.write();
        let topic = topics.entry(TypeId::of::<T>()).or_default();
        if let Some(tx) = topic.broadcast::<T>()? {
            return Ok(tx.subscribe());
        }

        trace!(event = type_name::<T>(), capacity, "Initializing broadcast channel");
        let (tx, rx) = broadcast::channel::<Arc<T>>(capacity);
        topic.broadcast = Some(Box::new(tx));
        Ok(rx)
    }

    /// Subscribes to the latest event of type `T`.
    ///
    /// `initial` seeds the channel only when nothing has been published yet.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the topic registry is corrupted.
    pub fn watch<T: Event>(&self, initial: T) -> Result<watch::Receiver<Arc<T>>, EventBusError> {
        let mut topics = self.topics.write();
        let topic = topics.entry(TypeId::of::<T>()).or_default();
        if let Some(tx) = topic.latest::<T>()? {
            return Ok(tx.subscribe());
        }

        let (tx, rx) = watch::channel(Arc::new(initial));
        topic.latest = Some(Box::new(tx));
        Ok(rx)
    }

    /// Registers a synchronous observer for events of type `T`.
    ///
    /// Observers run on the publishing thread after the bus lock is released,
    /// so they may publish other events.
    pub fn observe<T, F>(&self, handler: F)
    where
        T: Event,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let observer: Observer = Arc::new(move |event: &dyn Any| {
            if let Some(event) = event.downcast_ref::<T>() {
                handler(event);
            }
        });

        let mut topics = self.topics.write();
        topics.entry(TypeId::of::<T>()).or_default().observers.push(observer);
    }

    /// Returns the most recently published event of type `T`, if any.
    #[must_use]
    pub fn latest<T: Event>(&self) -> Option<Arc<T>> {
        let topics = self.topics.read();
        let tx = topics.get(&TypeId::of::<T>())?.latest::<T>().ok()??;
        let value = tx.borrow().clone();
        Some(value)
    }

    /// Publishes an event to every route registered for `T`.
    ///
    /// Returns how many broadcast receivers and observers the event reached.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the topic registry is corrupted.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        self.publish_arc(Arc::new(event))
    }

    /// Publishes an already shared event without re-wrapping.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the topic registry is corrupted.
    pub fn publish_arc<T: Event>(&self, event: Arc<T>) -> Result<usize, EventBusError> {
        let (broadcast, observers) = {
            let mut topics = self.topics.write();
            let topic = topics.entry(TypeId::of::<T>()).or_default();

            match topic.latest::<T>()? {
                Some(tx) => {
                    tx.send_replace(Arc::clone(&event));
                },
                None => {
                    let (tx, _) = watch::channel(Arc::clone(&event));
                    topic.latest = Some(Box::new(tx));
                },
            }

            (topic.broadcast::<T>()?, topic.observers.clone())
        };

        for observer in &observers {
            observer(event.as_ref());
        }

        let received = broadcast.and_then(|tx| tx.send(event).ok()).unwrap_or_default();
        let delivered = received + observers.len();
        trace!(event = type_name::<T>(), delivered, "Event dispatched");
        Ok(delivered)
    }

    /// Handle that does not keep the bus alive.
    ///
    /// Observers stored on a bus should capture this instead of a clone.
    #[must_use]
    pub fn downgrade(&self) -> WeakEventBus {
        WeakEventBus { topics: Arc::downgrade(&self.topics) }
    }

    /// Drops every topic, closing all receivers and forgetting observers.
    ///
    /// Returns the number of topics that were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut topics = self.topics.write();
        let count = topics.len();
        topics.clear();
        count
    }
}

/// Non-owning [`EventBus`] handle from [`EventBus::downgrade`].
#[derive(Debug, Clone, Default)]
pub struct WeakEventBus {
    topics: Weak<RwLock<FxHashMap<TypeId, Topic>>>,
}

impl WeakEventBus {
    /// The bus, unless every owning handle is gone.
    #[must_use]
    pub fn upgrade(&self) -> Option<EventBus> {
        self.topics.upgrade().map(|topics| EventBus { topics })
    }
}
