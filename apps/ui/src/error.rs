use feast::kernel::relation::RelationError;
use std::borrow::Cow;

#[feast_derive::feast_error]
pub enum UiError {
    #[error("Workload file error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("YAML serialization error{}: {source}", format_context(.context))]
    Yaml { source: serde_yaml::Error, context: Option<Cow<'static, str>> },

    #[error("JSON serialization error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Relation error{}: {source}", format_context(.context))]
    Relation { source: RelationError, context: Option<Cow<'static, str>> },
}
