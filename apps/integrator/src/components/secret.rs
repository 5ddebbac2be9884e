use super::{Relations, StoreContext, send_to_all};
use crate::error::IntegratorError;
use crate::manifests::{feature_store_secret, manifests_data};
use feast::kernel::reconcile::Component;
use feast::kernel::status::Status;
use feast::store_configuration::{FeastStoreConfiguration, render_feature_store};
use tracing::info;

/// Renders `feature_store.yaml` into a Secret and sends it to the resource
/// dispatcher.
#[derive(Debug)]
pub struct SecretSender {
    relations: Relations,
    relation: String,
    namespace: String,
    secret_name: String,
    context: StoreContext,
}

impl SecretSender {
    pub const NAME: &'static str = "secret-sender";

    pub fn new(
        relations: Relations,
        relation: impl Into<String>,
        namespace: impl Into<String>,
        secret_name: impl Into<String>,
        context: StoreContext,
    ) -> Self {
        Self {
            relations,
            relation: relation.into(),
            namespace: namespace.into(),
            secret_name: secret_name.into(),
            context,
        }
    }

    fn send(&self, configuration: &FeastStoreConfiguration) -> Result<usize, IntegratorError> {
        let document = render_feature_store(configuration)?;
        let data = manifests_data(&[feature_store_secret(&self.namespace, &self.secret_name, &document)])?;
        send_to_all(&self.relations, &self.relation, &data)
    }
}

impl Component for SecretSender {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reconcile(&mut self) -> Result<(), Status> {
        if self.relations.relation_ids(&self.relation).is_empty() {
            return Err(Status::blocked(format!("Please add the missing relation: {}", self.relation)));
        }

        let configuration = FeastStoreConfiguration::from_relation_data(&self.context.snapshot())
            .map_err(|e| Status::waiting(format!("Configuration not provided: {e}")))?;

        let sent = self.send(&configuration).map_err(|e| {
            Status::error(format!("Failed to send data on {} relation: {e}", self.relation))
        })?;
        info!(relation = %self.relation, secret = %self.secret_name, relations = sent, "Feature store secret sent");
        Ok(())
    }
}
