use crate::schema::Violation;
use std::borrow::Cow;

/// Errors raised by the store configuration provider, requirer and renderer.
#[feast_derive::feast_error]
pub enum StoreConfigurationError {
    /// No relation with the configured name exists. Needs operator action.
    #[error("Missing relation{}: {relation}", format_context(.context))]
    RelationMissing { relation: String, context: Option<Cow<'static, str>> },

    /// The relation exists but the other side has not published yet.
    #[error("No data found in relation data bag{}: {relation}", format_context(.context))]
    RelationDataMissing { relation: String, context: Option<Cow<'static, str>> },

    /// Published data breaks the schema.
    #[error("Invalid relation data{}: {violation}", format_context(.context))]
    DataInvalid { violation: Violation, context: Option<Cow<'static, str>> },

    #[error("Failed to render feature_store.yaml{}: {source}", format_context(.context))]
    Render { source: serde_yaml::Error, context: Option<Cow<'static, str>> },
}

impl From<Violation> for StoreConfigurationError {
    fn from(violation: Violation) -> Self {
        Self::DataInvalid { violation, context: None }
    }
}
