//! Reconciler components of the integrator charm.

mod pod_default;
mod postgres;
mod secret;
mod store_configuration;

pub use pod_default::PodDefaultSender;
pub use postgres::{PostgresRequirer, parse_database_data};
pub use secret::SecretSender;
pub use store_configuration::{StoreConfigurationSender, describe};

use feast::domain::relation::RelationData;
use feast::kernel::relation::RelationStore;
use parking_lot::RwLock;
use std::sync::Arc;

/// Relation store handle shared by all components.
pub type Relations = Arc<dyn RelationStore>;

/// Prefixed connection details gathered by the database requirers and read
/// by the senders.
#[derive(Debug, Clone, Default)]
pub struct StoreContext(Arc<RwLock<RelationData>>);

impl StoreContext {
    /// Replaces every key starting with `<prefix>_` by `entries`.
    pub fn replace(&self, prefix: &str, entries: RelationData) {
        let mut data = self.0.write();
        remove_prefixed(&mut data, prefix);
        data.extend(entries);
    }

    /// Drops every key starting with `<prefix>_`.
    pub fn clear(&self, prefix: &str) {
        remove_prefixed(&mut self.0.write(), prefix);
    }

    #[must_use]
    pub fn snapshot(&self) -> RelationData {
        self.0.read().clone()
    }
}

fn remove_prefixed(data: &mut RelationData, prefix: &str) {
    let prefix = format!("{prefix}_");
    data.retain(|key, _| !key.starts_with(&prefix));
}

/// Writes `data` to the local bag of every relation called `name`.
fn send_to_all(relations: &Relations, name: &str, data: &RelationData) -> Result<usize, crate::IntegratorError> {
    let ids = relations.relation_ids(name);
    for id in &ids {
        relations.update_local_app_data(name, *id, data.clone())?;
    }
    Ok(ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_only_touches_own_prefix() {
        let context = StoreContext::default();
        context.replace("registry", RelationData::from([("registry_host".to_owned(), "a".to_owned())]));
        context.replace(
            "online_store",
            RelationData::from([("online_store_host".to_owned(), "b".to_owned())]),
        );
        context.replace("registry", RelationData::from([("registry_port".to_owned(), "1".to_owned())]));

        let snapshot = context.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains_key("registry_port"));
        assert!(snapshot.contains_key("online_store_host"));

        context.clear("online_store");
        assert_eq!(context.snapshot().len(), 1);
    }
}
