use super::{Relations, StoreContext};
use feast::kernel::reconcile::Component;
use feast::kernel::status::Status;
use feast::store_configuration::{
    FeastStoreConfiguration, StoreConfigurationError, StoreConfigurationProvider, Violation,
};
use tracing::warn;

/// Validates the gathered connection details and publishes them over the
/// store configuration relation.
#[derive(Debug)]
pub struct StoreConfigurationSender {
    provider: StoreConfigurationProvider<Relations, bool>,
    relation: String,
    context: StoreContext,
}

impl StoreConfigurationSender {
    pub const NAME: &'static str = "store-configuration-sender";

    /// Components run only past the leadership gate, so `leader` is a plain flag.
    pub fn new(relations: Relations, relation: impl Into<String>, leader: bool, context: StoreContext) -> Self {
        let relation = relation.into();
        let provider = StoreConfigurationProvider::new(relations, leader).relation_name(relation.clone());
        Self { provider, relation, context }
    }
}

impl Component for StoreConfigurationSender {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reconcile(&mut self) -> Result<(), Status> {
        let configuration = FeastStoreConfiguration::from_relation_data(&self.context.snapshot())
            .map_err(|e| Status::blocked(describe(&e)))?;

        match self.provider.publish(&configuration) {
            Ok(_) => Ok(()),
            Err(StoreConfigurationError::RelationMissing { relation, .. }) => {
                warn!(relation = %relation, "Relation {relation} not added, UI is not integrated");
                Ok(())
            },
            Err(e) => Err(Status::waiting(format!("Relation {} error: {e}", self.relation))),
        }
    }
}

/// Operator-facing message for a configuration that cannot be built.
#[must_use]
pub fn describe(error: &StoreConfigurationError) -> String {
    match error {
        StoreConfigurationError::DataInvalid {
            violation: violation @ Violation::FieldSet { missing, .. }, ..
        } => {
            if missing.is_empty() {
                format!("Unexpected field(s) in relation data: {violation}")
            } else {
                format!("Missing required fields in creating FeastStoreConfiguration: {violation}")
            }
        },
        StoreConfigurationError::DataInvalid { violation, .. } => violation.to_string(),
        other => other.to_string(),
    }
}
