use super::{Relations, send_to_all};
use crate::manifests::{feast_access_pod_default, manifests_data};
use feast::kernel::reconcile::Component;
use feast::kernel::status::Status;
use tracing::debug;

/// Sends the PodDefault that mounts the feature store secret.
#[derive(Debug)]
pub struct PodDefaultSender {
    relations: Relations,
    relation: String,
    namespace: String,
    app_name: String,
    secret_name: String,
}

impl PodDefaultSender {
    pub const NAME: &'static str = "poddefault-sender";

    pub fn new(
        relations: Relations,
        relation: impl Into<String>,
        namespace: impl Into<String>,
        app_name: impl Into<String>,
        secret_name: impl Into<String>,
    ) -> Self {
        Self {
            relations,
            relation: relation.into(),
            namespace: namespace.into(),
            app_name: app_name.into(),
            secret_name: secret_name.into(),
        }
    }
}

impl Component for PodDefaultSender {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reconcile(&mut self) -> Result<(), Status> {
        if self.relations.relation_ids(&self.relation).is_empty() {
            return Err(Status::blocked(format!("Please add the missing relation: {}", self.relation)));
        }

        let manifest = feast_access_pod_default(&self.namespace, &self.app_name, &self.secret_name);
        let sent = manifests_data(&[manifest])
            .and_then(|data| send_to_all(&self.relations, &self.relation, &data))
            .map_err(|e| {
                Status::error(format!("Failed to send data on {} relation: {e}", self.relation))
            })?;
        debug!(relation = %self.relation, relations = sent, "PodDefault sent");
        Ok(())
    }
}
