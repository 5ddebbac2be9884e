use feast::kernel::relation::RelationError;
use feast::store_configuration::StoreConfigurationError;
use std::borrow::Cow;

#[feast_derive::feast_error]
pub enum IntegratorError {
    #[error("Store configuration error{}: {source}", format_context(.context))]
    StoreConfiguration { source: StoreConfigurationError, context: Option<Cow<'static, str>> },

    #[error("Manifest serialization error{}: {source}", format_context(.context))]
    Manifest { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Relation error{}: {source}", format_context(.context))]
    Relation { source: RelationError, context: Option<Cow<'static, str>> },
}
