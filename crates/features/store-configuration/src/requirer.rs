use crate::error::StoreConfigurationError;
use crate::render::render_feature_store;
use crate::schema::FeastStoreConfiguration;
use feast_domain::constants::STORE_CONFIGURATION_RELATION;
use feast_domain::relation::RelationData;
use feast_event_bus::EventBusError;
use feast_kernel::relation::{RelationChanged, RelationStore};
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Raised whenever the remote bag of the store configuration relation changes
/// or the relation goes away.
///
/// Carries the whole current bag, empty once the relation is broken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfigurationUpdated {
    pub relation: String,
    pub snapshot: RelationData,
}

/// Consuming side of the store configuration relation.
#[derive(Debug)]
pub struct StoreConfigurationRequirer<S> {
    store: S,
    relation_name: String,
    forwarding: OnceLock<()>,
}

impl<S: RelationStore> StoreConfigurationRequirer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            relation_name: STORE_CONFIGURATION_RELATION.to_owned(),
            forwarding: OnceLock::new(),
        }
    }

    /// Overrides the relation name (default `feast-configuration`).
    #[must_use]
    pub fn relation_name(mut self, name: impl Into<String>) -> Self {
        self.relation_name = name.into();
        self
    }

    /// Reads and validates the configuration published by the provider.
    ///
    /// With several relations under the name the lowest id is used.
    ///
    /// # Errors
    /// * [`StoreConfigurationError::RelationMissing`] without a relation.
    /// * [`StoreConfigurationError::RelationDataMissing`] while the remote bag is empty.
    /// * [`StoreConfigurationError::DataInvalid`] if the bag breaks the schema.
    pub fn fetch_configuration(&self) -> Result<FeastStoreConfiguration, StoreConfigurationError> {
        let ids = self.store.relation_ids(&self.relation_name);
        let Some(&id) = ids.first() else {
            return Err(StoreConfigurationError::RelationMissing {
                relation: self.relation_name.clone(),
                context: None,
            });
        };
        if ids.len() > 1 {
            warn!(relation = %self.relation_name, count = ids.len(), id, "Multiple relations found, using the first");
        }

        let data = self.store.remote_app_data(&self.relation_name, id).unwrap_or_default();
        if data.is_empty() {
            return Err(StoreConfigurationError::RelationDataMissing {
                relation: self.relation_name.clone(),
                context: None,
            });
        }

        FeastStoreConfiguration::from_relation_data(&data)
    }

    /// Fetches the configuration and renders `feature_store.yaml`.
    ///
    /// # Errors
    /// Everything [`StoreConfigurationRequirer::fetch_configuration`] and
    /// [`render_feature_store`] return.
    pub fn fetch_document(&self) -> Result<String, StoreConfigurationError> {
        render_feature_store(&self.fetch_configuration()?)
    }

    /// Calls `handler` with the full current bag every time a relation under
    /// the name changes or is broken.
    ///
    /// `handler` is kept by the store's bus until the bus is dropped.
    pub fn on_updated<F>(&self, handler: F)
    where
        F: Fn(&StoreConfigurationUpdated) + Send + Sync + 'static,
    {
        self.forward();
        let relation = self.relation_name.clone();
        self.store.events().observe(move |event: &StoreConfigurationUpdated| {
            if event.relation == relation {
                handler(event);
            }
        });
    }

    /// Latest [`StoreConfigurationUpdated`] seen on the store's bus.
    ///
    /// The channel is per event type, so share a bus between requirers of
    /// different relation names only if that is acceptable.
    ///
    /// # Errors
    /// Returns [`EventBusError`] if the bus registry is corrupted.
    pub fn watch_updates(&self) -> Result<watch::Receiver<Arc<StoreConfigurationUpdated>>, EventBusError> {
        self.forward();
        self.store.events().watch(StoreConfigurationUpdated {
            relation: self.relation_name.clone(),
            snapshot: RelationData::new(),
        })
    }

    /// Turns raw relation changes into [`StoreConfigurationUpdated`] once per requirer.
    ///
    /// The snapshot is the bag [`Self::fetch_configuration`] reads: the lowest
    /// id under the name, empty once no relation remains. The observer holds
    /// only a weak bus handle.
    fn forward(&self) {
        self.forwarding.get_or_init(|| {
            let bus = self.store.events().downgrade();
            let relation = self.relation_name.clone();

            self.store.events().observe(move |change: &RelationChanged| {
                if change.relation != relation {
                    return;
                }
                let Some(bus) = bus.upgrade() else {
                    return;
                };
                let snapshot = change.current.clone();
                debug!(relation = %relation, id = change.id, kind = ?change.kind, keys = snapshot.len(), "Store configuration updated");

                let event = StoreConfigurationUpdated { relation: relation.clone(), snapshot };
                if let Err(e) = bus.publish(event) {
                    warn!(relation = %relation, error = %e, "Failed to publish store configuration update");
                }
            });
        });
    }
}
