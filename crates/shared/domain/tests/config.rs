use feast_domain::config::{IntegratorConfig, LoggingConfig, UiConfig};
use feast_domain::constants::STORE_CONFIGURATION_RELATION;
use feast_domain::relation::ModelSnapshot;
use serde_json::json;
use std::path::PathBuf;

#[test]
fn integrator_defaults_match_charm_metadata() {
    let cfg = IntegratorConfig::default();
    assert_eq!(cfg.secret_name, "feature-store-yaml");
    assert_eq!(cfg.relations.registry, "registry");
    assert_eq!(cfg.relations.offline_store, "offline-store");
    assert_eq!(cfg.relations.online_store, "online-store");
    assert_eq!(cfg.relations.store_configuration, STORE_CONFIGURATION_RELATION);
}

#[test]
fn ui_defaults_match_charm_metadata() {
    let cfg = UiConfig::default();
    assert_eq!(cfg.http_port, 8888);
    assert_eq!(cfg.destination_path, PathBuf::from("/home/ubuntu/feature_store.yaml"));
    assert_eq!(cfg.ingress.prefix, "/feast");
    assert_eq!(cfg.relations.dashboard_links, "dashboard-links");

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.path.is_none());
}

#[test]
fn partial_config_keeps_defaults() {
    let raw = json!({
        "app_name": "feast-ui-staging",
        "relations": { "ingress": "gateway" },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: UiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.app_name, "feast-ui-staging");
    assert_eq!(cfg.relations.ingress, "gateway");
    assert_eq!(cfg.relations.store_configuration, "feast-configuration");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert_eq!(cfg.http_port, 8888);
}

#[test]
fn model_snapshot_deserializes_with_missing_bags() {
    let raw = json!({
        "leader": true,
        "relations": [
            { "id": 3, "name": "registry", "remote_app": "postgresql",
              "remote_app_data": { "endpoints": "10.0.0.1:5432" } }
        ]
    });

    let snapshot: ModelSnapshot = serde_json::from_value(raw).expect("snapshot deserialize");
    assert!(snapshot.leader);
    assert_eq!(snapshot.relations[0].id, 3);
    assert!(snapshot.relations[0].local_app_data.is_empty());
    assert_eq!(
        snapshot.relations[0].remote_app_data.get("endpoints").map(String::as_str),
        Some("10.0.0.1:5432")
    );
}
