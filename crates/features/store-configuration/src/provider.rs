use crate::error::StoreConfigurationError;
use crate::schema::FeastStoreConfiguration;
use feast_domain::constants::STORE_CONFIGURATION_RELATION;
use feast_kernel::leadership::Leadership;
use feast_kernel::relation::RelationStore;
use tracing::{debug, info};

/// Result of [`StoreConfigurationProvider::publish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// This unit is not the leader; nothing was written.
    Skipped,
    /// The configuration was written to every relation under the name.
    Published { relations: usize },
}

/// Publishing side of the store configuration relation.
#[derive(Debug)]
pub struct StoreConfigurationProvider<S, L> {
    store: S,
    leadership: L,
    relation_name: String,
}

impl<S: RelationStore, L: Leadership> StoreConfigurationProvider<S, L> {
    pub fn new(store: S, leadership: L) -> Self {
        Self { store, leadership, relation_name: STORE_CONFIGURATION_RELATION.to_owned() }
    }

    /// Overrides the relation name (default `feast-configuration`).
    #[must_use]
    pub fn relation_name(mut self, name: impl Into<String>) -> Self {
        self.relation_name = name.into();
        self
    }

    /// Writes the configuration into the local application bag of every
    /// relation under the configured name.
    ///
    /// Only the fifteen configuration keys are overwritten. On a non-leader
    /// unit this is a logged no-op.
    ///
    /// # Errors
    /// Returns [`StoreConfigurationError::RelationMissing`] if no relation exists.
    pub fn publish(
        &self,
        configuration: &FeastStoreConfiguration,
    ) -> Result<PublishOutcome, StoreConfigurationError> {
        if !self.leadership.is_leader() {
            info!("Store configuration provider is not the leader, skipping publish");
            return Ok(PublishOutcome::Skipped);
        }

        let ids = self.store.relation_ids(&self.relation_name);
        if ids.is_empty() {
            return Err(self.missing());
        }

        let data = configuration.to_relation_data();
        for id in &ids {
            self.store.update_local_app_data(&self.relation_name, *id, data.clone()).map_err(|e| {
                debug!(relation = %self.relation_name, id, error = %e, "Relation vanished while publishing");
                self.missing()
            })?;
        }

        info!(relation = %self.relation_name, relations = ids.len(), "Store configuration published");
        Ok(PublishOutcome::Published { relations: ids.len() })
    }

    fn missing(&self) -> StoreConfigurationError {
        StoreConfigurationError::RelationMissing { relation: self.relation_name.clone(), context: None }
    }
}
