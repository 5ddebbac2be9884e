use feast::domain::config::UiConfig;
use feast::domain::relation::{ModelSnapshot, RelationData, RelationSnapshot};
use feast::kernel::status::Status;
use feast::store_configuration::FeastStoreConfiguration;
use feast_ui::components::{DASHBOARD_LINKS_KEY, StoreConfigurationReceiver, UiWorkload, layer_path};
use feast_ui::reconcile;
use std::fs;

fn configuration() -> RelationData {
    let pairs = [
        ("registry_user", "u"),
        ("registry_password", "p"),
        ("registry_host", "h"),
        ("registry_port", "5432"),
        ("registry_database", "d"),
        ("offline_store_host", "offline-host"),
        ("offline_store_port", "5433"),
        ("offline_store_database", "offline_db"),
        ("offline_store_user", "offline_user"),
        ("offline_store_password", "offline_pw"),
        ("online_store_host", "online-host"),
        ("online_store_port", "5434"),
        ("online_store_database", "online_db"),
        ("online_store_user", "online_user"),
        ("online_store_password", "online_pw"),
    ];
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

fn relation(id: u32, name: &str, remote: RelationData) -> RelationSnapshot {
    RelationSnapshot { id, name: name.to_owned(), remote_app: "remote".to_owned(), remote_app_data: remote, ..Default::default() }
}

fn config(dir: &tempfile::TempDir) -> UiConfig {
    UiConfig { destination_path: dir.path().join("home/feature_store.yaml"), ..UiConfig::default() }
}

fn model(remote: RelationData) -> ModelSnapshot {
    ModelSnapshot {
        leader: true,
        relations: vec![
            relation(0, "feast-configuration", remote),
            relation(1, "ingress", RelationData::new()),
            relation(2, "dashboard-links", RelationData::new()),
        ],
    }
}

fn local<'a>(snapshot: &'a ModelSnapshot, name: &str) -> &'a RelationData {
    &snapshot.relations.iter().find(|r| r.name == name).unwrap().local_app_data
}

#[test]
fn writes_document_and_layer() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let outcome = reconcile(&config, &model(configuration()));

    assert_eq!(outcome.report.unit_status(), Status::Active);
    assert_eq!(outcome.updates, 1);

    let document = fs::read_to_string(&config.destination_path).unwrap();
    let expected =
        feast::store_configuration::render_feature_store(&FeastStoreConfiguration::from_relation_data(&configuration()).unwrap())
            .unwrap();
    assert_eq!(document, expected);

    let layer = fs::read_to_string(layer_path(&config.destination_path)).unwrap();
    assert!(layer.starts_with("summary: feast-ui layer\n"));
    assert!(layer.contains("command: feast ui"));

    let ingress = local(&outcome.snapshot, "ingress");
    assert!(ingress["data"].contains("service: feast-ui"));
    assert!(ingress["data"].contains("port: 8888"));
    assert!(local(&outcome.snapshot, "dashboard-links")[DASHBOARD_LINKS_KEY].contains(r#""link":"/feast/""#));
}

#[test]
fn missing_relation_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let mut snapshot = model(configuration());
    snapshot.relations.remove(0);

    let outcome = reconcile(&config(&dir), &snapshot);
    assert_eq!(outcome.report.unit_status(), Status::blocked("Missing relation: feast-configuration"));
    assert!(matches!(outcome.report.status_of(UiWorkload::NAME), Some(Status::Waiting(_))));
    assert_eq!(outcome.updates, 0);
}

#[test]
fn empty_bag_waits() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = reconcile(&config(&dir), &model(RelationData::new()));

    let Some(Status::Waiting(message)) = outcome.report.status_of(StoreConfigurationReceiver::NAME) else {
        panic!("expected waiting");
    };
    assert!(message.starts_with("Waiting for relation data: "), "{message}");
    assert!(!config(&dir).destination_path.exists());
}

#[test]
fn invalid_bag_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let mut remote = configuration();
    remote.insert("registry_port".into(), "not-a-port".into());

    let outcome = reconcile(&config(&dir), &model(remote));
    let Some(Status::Blocked(message)) = outcome.report.status_of(StoreConfigurationReceiver::NAME) else {
        panic!("expected blocked");
    };
    assert!(message.starts_with("Invalid relation data: registry_port"), "{message}");
}

#[test]
fn non_leader_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut snapshot = model(configuration());
    snapshot.leader = false;

    let outcome = reconcile(&config(&dir), &snapshot);
    assert_eq!(outcome.report.unit_status(), Status::waiting("Waiting for leadership"));
    assert_eq!(outcome.snapshot, snapshot);
    assert!(!config(&dir).destination_path.exists());
}
