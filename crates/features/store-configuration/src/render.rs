//! Rendering of `feature_store.yaml`.
//!
//! Everything except the connection parameters is fixed, and the keys are
//! emitted in declaration order.

use crate::error::StoreConfigurationError;
use crate::schema::{FeastStoreConfiguration, StoreConnection};
use serde::Serialize;

pub const PROJECT: &str = "feast_project";
pub const PROVIDER: &str = "local";
pub const REGISTRY_TYPE: &str = "sql";
pub const REGISTRY_SCHEME: &str = "postgresql";
pub const CACHE_TTL_SECONDS: u32 = 60;
pub const STORE_TYPE: &str = "postgres";
pub const DB_SCHEMA: &str = "public";
pub const ENTITY_KEY_SERIALIZATION_VERSION: u8 = 2;

#[derive(Debug, Serialize)]
struct FeatureStoreDocument<'a> {
    project: &'static str,
    registry: RegistryBlock,
    provider: &'static str,
    offline_store: StoreBlock<'a>,
    online_store: StoreBlock<'a>,
    entity_key_serialization_version: u8,
}

#[derive(Debug, Serialize)]
struct RegistryBlock {
    registry_type: &'static str,
    path: String,
    cache_ttl_seconds: u32,
    sqlalchemy_config_kwargs: SqlAlchemyKwargs,
}

#[derive(Debug, Serialize)]
struct SqlAlchemyKwargs {
    echo: bool,
    pool_pre_ping: bool,
}

#[derive(Debug, Serialize)]
struct StoreBlock<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    host: &'a str,
    port: u16,
    database: &'a str,
    db_schema: &'static str,
    user: &'a str,
    password: &'a str,
}

impl<'a> From<&'a StoreConnection> for StoreBlock<'a> {
    fn from(conn: &'a StoreConnection) -> Self {
        Self {
            kind: STORE_TYPE,
            host: conn.host(),
            port: conn.port(),
            database: conn.database(),
            db_schema: DB_SCHEMA,
            user: conn.user(),
            password: conn.password(),
        }
    }
}

/// Connection URI of the SQL registry. Components are not URL-escaped.
#[must_use]
pub fn registry_path(registry: &StoreConnection) -> String {
    format!(
        "{REGISTRY_SCHEME}://{}:{}@{}:{}/{}",
        registry.user(),
        registry.password(),
        registry.host(),
        registry.port(),
        registry.database()
    )
}

/// Renders `feature_store.yaml` for a validated configuration.
///
/// The output is deterministic: the same configuration always renders to
/// the same bytes.
///
/// # Errors
/// Returns [`StoreConfigurationError::Render`] if YAML serialization fails.
pub fn render_feature_store(
    configuration: &FeastStoreConfiguration,
) -> Result<String, StoreConfigurationError> {
    let document = FeatureStoreDocument {
        project: PROJECT,
        registry: RegistryBlock {
            registry_type: REGISTRY_TYPE,
            path: registry_path(configuration.registry()),
            cache_ttl_seconds: CACHE_TTL_SECONDS,
            sqlalchemy_config_kwargs: SqlAlchemyKwargs { echo: false, pool_pre_ping: true },
        },
        provider: PROVIDER,
        offline_store: configuration.offline_store().into(),
        online_store: configuration.online_store().into(),
        entity_key_serialization_version: ENTITY_KEY_SERIALIZATION_VERSION,
    };

    Ok(serde_yaml::to_string(&document)?)
}
