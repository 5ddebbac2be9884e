use super::DocumentSlot;
use super::Relations;
use feast::kernel::reconcile::Component;
use feast::kernel::status::Status;
use feast::store_configuration::{StoreConfigurationError, StoreConfigurationRequirer};
use std::sync::Arc;
use tracing::info;

/// Fetches the store configuration and hands the rendered document to the
/// workload.
#[derive(Debug)]
pub struct StoreConfigurationReceiver {
    requirer: Arc<StoreConfigurationRequirer<Relations>>,
    document: DocumentSlot,
}

impl StoreConfigurationReceiver {
    pub const NAME: &'static str = "store-configuration-receiver";

    pub const fn new(requirer: Arc<StoreConfigurationRequirer<Relations>>, document: DocumentSlot) -> Self {
        Self { requirer, document }
    }
}

impl Component for StoreConfigurationReceiver {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reconcile(&mut self) -> Result<(), Status> {
        let fetched = self.requirer.fetch_document();
        match fetched {
            Ok(document) if !document.trim().is_empty() => {
                self.document.set(document);
                Ok(())
            },
            Ok(_) => {
                self.document.clear();
                Err(Status::waiting("feature_store.yaml is missing or empty"))
            },
            Err(e) => {
                self.document.clear();
                info!(error = %e, "Stopped early during feature store file generation");
                Err(receiver_status(&e))
            },
        }
    }
}

/// Unit status for a failed fetch.
#[must_use]
pub fn receiver_status(error: &StoreConfigurationError) -> Status {
    match error {
        StoreConfigurationError::RelationMissing { relation, .. } => {
            Status::blocked(format!("Missing relation: {relation}"))
        },
        StoreConfigurationError::RelationDataMissing { .. } => {
            Status::waiting(format!("Waiting for relation data: {error}"))
        },
        StoreConfigurationError::DataInvalid { violation, .. } => {
            Status::blocked(format!("Invalid relation data: {violation}"))
        },
        StoreConfigurationError::Render { .. } => {
            Status::error(format!("Failed to render feature_store.yaml: {error}"))
        },
    }
}
