use super::{Relations, send_to_all};
use crate::error::UiError;
use feast::domain::relation::RelationData;
use feast::kernel::reconcile::Component;
use feast::kernel::status::Status;
use serde::Serialize;
use tracing::{debug, info};

/// Schema versions the ingress provider may pick from.
pub const SUPPORTED_VERSIONS: &str = "- v1";

/// Route requested from the ingress provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngressData {
    pub prefix: String,
    pub rewrite: String,
    pub service: String,
    pub namespace: String,
    pub port: u16,
}

impl IngressData {
    /// Bag sent on the relation: the route as YAML under `data`.
    ///
    /// # Errors
    /// Returns [`UiError::Yaml`] if serialization fails.
    pub fn to_relation_data(&self) -> Result<RelationData, UiError> {
        Ok(RelationData::from([
            ("_supported_versions".to_owned(), SUPPORTED_VERSIONS.to_owned()),
            ("data".to_owned(), serde_yaml::to_string(self)?),
        ]))
    }
}

/// Broadcasts [`IngressData`] on every ingress relation.
#[derive(Debug)]
pub struct IngressSender {
    relations: Relations,
    relation: String,
    data: IngressData,
}

impl IngressSender {
    pub const NAME: &'static str = "relation:ingress";

    pub fn new(relations: Relations, relation: impl Into<String>, data: IngressData) -> Self {
        Self { relations, relation: relation.into(), data }
    }
}

impl Component for IngressSender {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reconcile(&mut self) -> Result<(), Status> {
        let sent = self
            .data
            .to_relation_data()
            .and_then(|data| send_to_all(&self.relations, &self.relation, &data))
            .map_err(|e| Status::error(format!("Failed to send data on {} relation: {e}", self.relation)))?;

        if sent == 0 {
            info!(relation = %self.relation, "No relation found, nothing to send");
        } else {
            debug!(relation = %self.relation, relations = sent, prefix = %self.data.prefix, "Ingress route sent");
        }
        Ok(())
    }
}
