use super::{ChangeKind, RelationChanged, RelationError, RelationErrorExt, RelationStore};
use feast_domain::relation::{ModelSnapshot, RelationData, RelationId, RelationSnapshot};
use feast_event_bus::EventBus;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Inner {
    relations: BTreeMap<RelationId, RelationSnapshot>,
    next_id: RelationId,
}

impl Inner {
    fn get(&self, name: &str, id: RelationId) -> Option<&RelationSnapshot> {
        self.relations.get(&id).filter(|r| r.name == name)
    }

    fn get_mut(&mut self, name: &str, id: RelationId) -> Result<&mut RelationSnapshot, RelationError> {
        self.relations.get_mut(&id).filter(|r| r.name == name).ok_or_else(|| {
            RelationError::NotFound { message: format!("{name}:{id}").into(), context: None }
        })
    }
}

/// In-memory [`RelationStore`].
///
/// Cloning is cheap and clones share state. Remote bag writes and removals
/// publish [`RelationChanged`] on the attached bus once the internal lock is
/// released, so observers may read the store again.
#[derive(Debug, Clone, Default)]
pub struct MemoryRelations {
    inner: Arc<RwLock<Inner>>,
    events: EventBus,
}

impl MemoryRelations {
    #[must_use]
    pub fn new(events: EventBus) -> Self {
        Self { inner: Arc::default(), events }
    }

    /// Rebuilds a store from a snapshot. No events are published.
    #[must_use]
    pub fn from_snapshot(snapshot: &ModelSnapshot, events: EventBus) -> Self {
        let relations: BTreeMap<_, _> =
            snapshot.relations.iter().map(|r| (r.id, r.clone())).collect();
        let next_id = relations.keys().next_back().map_or(0, |id| id + 1);
        Self { inner: Arc::new(RwLock::new(Inner { relations, next_id })), events }
    }

    /// Current state as a serializable snapshot, relations ordered by id.
    #[must_use]
    pub fn snapshot(&self, leader: bool) -> ModelSnapshot {
        ModelSnapshot { leader, relations: self.inner.read().relations.values().cloned().collect() }
    }

    /// Establishes a new relation with empty bags and returns its id.
    pub fn add_relation(&self, name: impl Into<String>, remote_app: impl Into<String>) -> RelationId {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        let name = name.into();
        debug!(relation = %name, id, "Relation established");
        inner.relations.insert(
            id,
            RelationSnapshot { id, name, remote_app: remote_app.into(), ..RelationSnapshot::default() },
        );
        id
    }

    /// Replaces the remote application bag and publishes [`ChangeKind::Changed`].
    ///
    /// # Errors
    /// Returns [`RelationError::NotFound`] if the relation does not exist.
    pub fn set_remote_app_data(
        &self,
        name: &str,
        id: RelationId,
        data: RelationData,
    ) -> Result<(), RelationError> {
        self.inner.write().get_mut(name, id)?.remote_app_data = data;
        self.notify(name, id, ChangeKind::Changed);
        Ok(())
    }

    /// Removes a relation and publishes [`ChangeKind::Broken`].
    ///
    /// # Errors
    /// Returns [`RelationError::NotFound`] if the relation does not exist.
    pub fn remove_relation(&self, name: &str, id: RelationId) -> Result<RelationSnapshot, RelationError> {
        let removed = {
            let mut inner = self.inner.write();
            inner.get_mut(name, id)?;
            inner.relations.remove(&id)
        };
        let removed = removed.ok_or_else(|| RelationError::NotFound {
            message: format!("{name}:{id}").into(),
            context: None,
        })?;
        self.notify(name, id, ChangeKind::Broken);
        Ok(removed)
    }

    /// Publishes [`ChangeKind::Changed`] for every relation whose remote bag
    /// holds data, in id order.
    ///
    /// Used after loading a snapshot so observers see the state they would
    /// have been told about when it was written.
    pub fn replay(&self) -> usize {
        let populated: Vec<(String, RelationId)> = self
            .inner
            .read()
            .relations
            .values()
            .filter(|r| !r.remote_app_data.is_empty())
            .map(|r| (r.name.clone(), r.id))
            .collect();

        for (name, id) in &populated {
            self.notify(name, *id, ChangeKind::Changed);
        }
        populated.len()
    }

    fn notify(&self, name: &str, id: RelationId, kind: ChangeKind) {
        let current = self
            .inner
            .read()
            .relations
            .values()
            .find(|r| r.name == name)
            .map(|r| r.remote_app_data.clone())
            .unwrap_or_default();
        let event = RelationChanged { relation: name.to_owned(), id, kind, current };
        if let Err(e) = self.events.publish(event) {
            warn!(relation = %name, id, error = %e, "Failed to publish relation change");
        }
    }
}

impl RelationStore for MemoryRelations {
    fn relation_ids(&self, name: &str) -> Vec<RelationId> {
        self.inner.read().relations.values().filter(|r| r.name == name).map(|r| r.id).collect()
    }

    fn remote_app(&self, name: &str, id: RelationId) -> Option<String> {
        self.inner.read().get(name, id).map(|r| r.remote_app.clone())
    }

    fn remote_app_data(&self, name: &str, id: RelationId) -> Option<RelationData> {
        self.inner.read().get(name, id).map(|r| r.remote_app_data.clone())
    }

    fn local_app_data(&self, name: &str, id: RelationId) -> Option<RelationData> {
        self.inner.read().get(name, id).map(|r| r.local_app_data.clone())
    }

    fn update_local_app_data(
        &self,
        name: &str,
        id: RelationId,
        entries: RelationData,
    ) -> Result<(), RelationError> {
        let mut inner = self.inner.write();
        let relation = inner.get_mut(name, id)?;
        debug!(relation = %name, id, keys = entries.len(), "Updating local application data");
        relation.local_app_data.extend(entries);
        Ok(())
    }

    fn events(&self) -> &EventBus {
        &self.events
    }
}

/// Reads a JSON [`ModelSnapshot`] from disk.
///
/// # Errors
/// Returns [`RelationError::Io`] or [`RelationError::Json`].
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<ModelSnapshot, RelationError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).context(format!("Reading {}", path.display()))?;
    serde_json::from_str(&raw).context(format!("Parsing {}", path.display()))
}

/// Writes a [`ModelSnapshot`] to disk as pretty JSON.
///
/// # Errors
/// Returns [`RelationError::Io`] or [`RelationError::Json`].
pub fn write_snapshot(path: impl AsRef<Path>, snapshot: &ModelSnapshot) -> Result<(), RelationError> {
    let path = path.as_ref();
    let raw = serde_json::to_string_pretty(snapshot).context("Serializing snapshot")?;
    fs::write(path, raw).context(format!("Writing {}", path.display()))
}
