//! Relation names and fixed values used by both charms.

/// Relation over which the integrator publishes the store configuration.
pub const STORE_CONFIGURATION_RELATION: &str = "feast-configuration";

pub const REGISTRY_RELATION: &str = "registry";
pub const OFFLINE_STORE_RELATION: &str = "offline-store";
pub const ONLINE_STORE_RELATION: &str = "online-store";
pub const SECRETS_RELATION: &str = "secrets";
pub const POD_DEFAULTS_RELATION: &str = "pod-defaults";
pub const INGRESS_RELATION: &str = "ingress";
pub const DASHBOARD_LINKS_RELATION: &str = "dashboard-links";

/// Name of the Kubernetes Secret holding `feature_store.yaml`.
pub const FEATURE_STORE_SECRET: &str = "feature-store-yaml";

/// File name the Feast tooling looks for.
pub const FEATURE_STORE_FILE: &str = "feature_store.yaml";
