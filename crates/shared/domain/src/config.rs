use crate::constants::{
    DASHBOARD_LINKS_RELATION, FEATURE_STORE_SECRET, INGRESS_RELATION, OFFLINE_STORE_RELATION,
    ONLINE_STORE_RELATION, POD_DEFAULTS_RELATION, REGISTRY_RELATION, SECRETS_RELATION,
    STORE_CONFIGURATION_RELATION,
};
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration of the `feast-integrator` charm.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    pub app_name: String,
    pub namespace: String,
    pub secret_name: String,
    pub relations: IntegratorRelations,
    pub logging: LoggingConfig,
}

/// Relation names used by the integrator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntegratorRelations {
    pub registry: String,
    pub offline_store: String,
    pub online_store: String,
    pub secrets: String,
    pub pod_defaults: String,
    pub store_configuration: String,
}

/// Configuration of the `feast-ui` charm.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub app_name: String,
    pub namespace: String,
    pub http_port: u16,
    pub service_name: String,
    /// Where the UI process expects `feature_store.yaml`.
    pub destination_path: PathBuf,
    pub ingress: IngressConfig,
    pub relations: UiRelations,
    pub logging: LoggingConfig,
}

/// Relation names used by the UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiRelations {
    pub store_configuration: String,
    pub ingress: String,
    pub dashboard_links: String,
}

/// Path routing requested from the ingress gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngressConfig {
    pub prefix: String,
    pub rewrite: String,
}

/// `[logging]` section shared by both charms.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub console: bool,
    pub filter: Option<String>,
    pub path: Option<PathBuf>,
    pub rotation: String,
    pub max_files: usize,
    pub json: bool,
}

// --- Default ---

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            app_name: "feast-integrator".to_owned(),
            namespace: "kubeflow".to_owned(),
            secret_name: FEATURE_STORE_SECRET.to_owned(),
            relations: IntegratorRelations::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IntegratorRelations {
    fn default() -> Self {
        Self {
            registry: REGISTRY_RELATION.to_owned(),
            offline_store: OFFLINE_STORE_RELATION.to_owned(),
            online_store: ONLINE_STORE_RELATION.to_owned(),
            secrets: SECRETS_RELATION.to_owned(),
            pod_defaults: POD_DEFAULTS_RELATION.to_owned(),
            store_configuration: STORE_CONFIGURATION_RELATION.to_owned(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            app_name: "feast-ui".to_owned(),
            namespace: "kubeflow".to_owned(),
            http_port: 8888,
            service_name: "feast-ui".to_owned(),
            destination_path: PathBuf::from("/home/ubuntu/feature_store.yaml"),
            ingress: IngressConfig::default(),
            relations: UiRelations::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for UiRelations {
    fn default() -> Self {
        Self {
            store_configuration: STORE_CONFIGURATION_RELATION.to_owned(),
            ingress: INGRESS_RELATION.to_owned(),
            dashboard_links: DASHBOARD_LINKS_RELATION.to_owned(),
        }
    }
}

impl Default for IngressConfig {
    fn default() -> Self {
        Self { prefix: "/feast".to_owned(), rewrite: "/".to_owned() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            console: true,
            filter: None,
            path: None,
            rotation: "daily".to_owned(),
            max_files: 7,
            json: false,
        }
    }
}
