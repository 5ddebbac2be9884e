mod common;

use common::valid_data;
use feast_store_configuration::render::registry_path;
use feast_store_configuration::{FeastStoreConfiguration, render_feature_store};

const EXPECTED: &str = "\
project: feast_project
registry:
  registry_type: sql
  path: postgresql://u:p@h:5432/d
  cache_ttl_seconds: 60
  sqlalchemy_config_kwargs:
    echo: false
    pool_pre_ping: true
provider: local
offline_store:
  type: postgres
  host: offline-host
  port: 5433
  database: offline_db
  db_schema: public
  user: offline_user
  password: offline_pw
online_store:
  type: postgres
  host: online-host
  port: 5434
  database: online_db
  db_schema: public
  user: online_user
  password: online_pw
entity_key_serialization_version: 2
";

fn configuration() -> FeastStoreConfiguration {
    FeastStoreConfiguration::from_relation_data(&valid_data()).unwrap()
}

#[test]
fn renders_fixed_document() {
    assert_eq!(render_feature_store(&configuration()).unwrap(), EXPECTED);
}

#[test]
fn rendering_is_deterministic() {
    let cfg = configuration();
    let first = render_feature_store(&cfg).unwrap();
    let second = render_feature_store(&cfg.clone()).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn registry_path_and_version() {
    let cfg = configuration();
    assert_eq!(registry_path(cfg.registry()), "postgresql://u:p@h:5432/d");

    let parsed: serde_yaml::Value = serde_yaml::from_str(&render_feature_store(&cfg).unwrap()).unwrap();
    assert_eq!(parsed["registry"]["path"].as_str(), Some("postgresql://u:p@h:5432/d"));
    assert_eq!(parsed["entity_key_serialization_version"].as_u64(), Some(2));
    assert_eq!(parsed["online_store"]["port"].as_u64(), Some(5434));
}

#[test]
fn top_level_key_order_is_fixed() {
    let rendered = render_feature_store(&configuration()).unwrap();
    let keys: Vec<&str> = rendered
        .lines()
        .filter(|line| !line.starts_with(' '))
        .filter_map(|line| line.split(':').next())
        .collect();
    assert_eq!(
        keys,
        ["project", "registry", "provider", "offline_store", "online_store", "entity_key_serialization_version"]
    );
}

#[test]
fn special_characters_are_not_escaped_in_path() {
    let mut data = valid_data();
    data.insert("registry_password".to_owned(), "p@ss/word".to_owned());
    let cfg = FeastStoreConfiguration::from_relation_data(&data).unwrap();

    assert_eq!(registry_path(cfg.registry()), "postgresql://u:p@ss/word@h:5432/d");
    let parsed: serde_yaml::Value = serde_yaml::from_str(&render_feature_store(&cfg).unwrap()).unwrap();
    assert_eq!(parsed["registry"]["path"].as_str(), Some("postgresql://u:p@ss/word@h:5432/d"));
}
