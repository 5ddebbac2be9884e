//! Reconciler components of the UI charm.

mod dashboard;
mod ingress;
mod receiver;
mod workload;

pub use dashboard::{DASHBOARD_LINKS_KEY, DashboardLink, DashboardLinksSender, feast_links};
pub use ingress::{IngressData, IngressSender, SUPPORTED_VERSIONS};
pub use receiver::{StoreConfigurationReceiver, receiver_status};
pub use workload::{UiWorkload, layer_path};

use feast::domain::relation::RelationData;
use feast::kernel::relation::RelationStore;
use parking_lot::RwLock;
use std::sync::Arc;

/// Relation store handle shared by all components.
pub type Relations = Arc<dyn RelationStore>;

/// Latest rendered `feature_store.yaml`, handed from the receiver to the workload.
#[derive(Debug, Clone, Default)]
pub struct DocumentSlot(Arc<RwLock<Option<String>>>);

impl DocumentSlot {
    pub fn set(&self, document: String) {
        *self.0.write() = Some(document);
    }

    pub fn clear(&self) {
        self.0.write().take();
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.0.read().clone()
    }
}

/// Writes `data` to the local bag of every relation called `name`.
fn send_to_all(relations: &Relations, name: &str, data: &RelationData) -> Result<usize, crate::UiError> {
    let ids = relations.relation_ids(name);
    for id in &ids {
        relations.update_local_app_data(name, *id, data.clone())?;
    }
    Ok(ids.len())
}
