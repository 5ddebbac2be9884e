//! Relation data access.
//!
//! A relation is a named channel between two applications. Each established
//! relation has an id and two application bags: the local one (written by our
//! leader) and the remote one (written by the other side).

mod memory;

pub use memory::{MemoryRelations, read_snapshot, write_snapshot};

use feast_domain::relation::{RelationData, RelationId};
use feast_event_bus::EventBus;
use std::borrow::Cow;

#[feast_derive::feast_error]
pub enum RelationError {
    #[error("Relation not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Snapshot I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Snapshot format error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

/// What happened to a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The remote application bag was written.
    Changed,
    /// The relation was removed.
    Broken,
}

/// Published on the store's [`EventBus`] after a remote bag changes or a
/// relation goes away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationChanged {
    pub relation: String,
    pub id: RelationId,
    pub kind: ChangeKind,
    /// Remote bag of the lowest-id relation still under `relation` after the
    /// change; empty once none remain.
    pub current: RelationData,
}

/// Access to relation application bags.
///
/// Reads return owned copies; writes to the local bag merge key by key.
pub trait RelationStore: std::fmt::Debug + Send + Sync {
    /// Ids of every established relation called `name`, ascending.
    fn relation_ids(&self, name: &str) -> Vec<RelationId>;

    /// Name of the application on the other side.
    fn remote_app(&self, name: &str, id: RelationId) -> Option<String>;

    /// Copy of the bag written by the remote application.
    fn remote_app_data(&self, name: &str, id: RelationId) -> Option<RelationData>;

    /// Copy of the bag written by this application.
    fn local_app_data(&self, name: &str, id: RelationId) -> Option<RelationData>;

    /// Inserts or overwrites `entries` in the local bag. Other keys are kept.
    ///
    /// # Errors
    /// Returns [`RelationError::NotFound`] if the relation does not exist.
    fn update_local_app_data(
        &self,
        name: &str,
        id: RelationId,
        entries: RelationData,
    ) -> Result<(), RelationError>;

    /// Bus on which [`RelationChanged`] events are published.
    fn events(&self) -> &EventBus;

    /// Lowest relation id under `name`, if any.
    fn first_relation(&self, name: &str) -> Option<RelationId> {
        self.relation_ids(name).first().copied()
    }
}

impl<S: RelationStore + ?Sized> RelationStore for std::sync::Arc<S> {
    fn relation_ids(&self, name: &str) -> Vec<RelationId> {
        (**self).relation_ids(name)
    }

    fn remote_app(&self, name: &str, id: RelationId) -> Option<String> {
        (**self).remote_app(name, id)
    }

    fn remote_app_data(&self, name: &str, id: RelationId) -> Option<RelationData> {
        (**self).remote_app_data(name, id)
    }

    fn local_app_data(&self, name: &str, id: RelationId) -> Option<RelationData> {
        (**self).local_app_data(name, id)
    }

    fn update_local_app_data(
        &self,
        name: &str,
        id: RelationId,
        entries: RelationData,
    ) -> Result<(), RelationError> {
        (**self).update_local_app_data(name, id, entries)
    }

    fn events(&self) -> &EventBus {
        (**self).events()
    }
}
