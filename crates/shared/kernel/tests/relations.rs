use feast_kernel::domain::relation::RelationData;
use feast_kernel::events::EventBus;
use feast_kernel::relation::{
    ChangeKind, MemoryRelations, RelationChanged, RelationStore, read_snapshot, write_snapshot,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tempfile::TempDir;

fn data(pairs: &[(&str, &str)]) -> RelationData {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

fn recorder(bus: &EventBus) -> Arc<Mutex<Vec<RelationChanged>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    bus.observe(move |event: &RelationChanged| sink.lock().push(event.clone()));
    seen
}

#[test]
fn remote_writes_and_removals_are_published() {
    let bus = EventBus::new();
    let seen = recorder(&bus);
    let relations = MemoryRelations::new(bus);

    let id = relations.add_relation("feast-configuration", "feast-integrator");
    relations.set_remote_app_data("feast-configuration", id, data(&[("registry_host", "h")])).unwrap();
    relations.update_local_app_data("feast-configuration", id, data(&[("ignored", "x")])).unwrap();
    relations.remove_relation("feast-configuration", id).unwrap();

    let kinds: Vec<ChangeKind> = seen.lock().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ChangeKind::Changed, ChangeKind::Broken]);
    assert!(relations.relation_ids("feast-configuration").is_empty());
}

#[test]
fn observers_can_read_the_store() {
    let bus = EventBus::new();
    let relations = MemoryRelations::new(bus.clone());
    let copy = Arc::new(Mutex::new(None));

    let reader = relations.clone();
    let sink = Arc::clone(&copy);
    bus.observe(move |event: &RelationChanged| {
        *sink.lock() = reader.remote_app_data(&event.relation, event.id);
    });

    let id = relations.add_relation("registry", "postgresql");
    relations.set_remote_app_data("registry", id, data(&[("database", "feast")])).unwrap();

    assert_eq!(*copy.lock(), Some(data(&[("database", "feast")])));
}

#[test]
fn snapshot_file_round_trip_and_replay() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");

    let relations = MemoryRelations::default();
    let registry = relations.add_relation("registry", "postgresql");
    relations.add_relation("ingress", "istio-pilot");
    relations.set_remote_app_data("registry", registry, data(&[("endpoints", "10.1.1.1:5432")])).unwrap();
    write_snapshot(&path, &relations.snapshot(true)).unwrap();

    let snapshot = read_snapshot(&path).unwrap();
    assert!(snapshot.leader);
    assert_eq!(snapshot.relations.len(), 2);

    let bus = EventBus::new();
    let seen = recorder(&bus);
    let restored = MemoryRelations::from_snapshot(&snapshot, bus);
    assert!(seen.lock().is_empty());

    assert_eq!(restored.replay(), 1);
    assert_eq!(
        seen.lock().as_slice(),
        &[RelationChanged {
            relation: "registry".into(),
            id: registry,
            kind: ChangeKind::Changed,
            current: data(&[("endpoints", "10.1.1.1:5432")]),
        }]
    );
}

#[test]
fn events_carry_the_lowest_id_bag() {
    let bus = EventBus::new();
    let seen = recorder(&bus);
    let relations = MemoryRelations::new(bus);

    let first = relations.add_relation("feast-configuration", "feast-integrator");
    let second = relations.add_relation("feast-configuration", "feast-integrator-b");
    relations.set_remote_app_data("feast-configuration", first, data(&[("registry_host", "a")])).unwrap();
    relations.set_remote_app_data("feast-configuration", second, data(&[("registry_host", "b")])).unwrap();
    relations.remove_relation("feast-configuration", second).unwrap();
    relations.remove_relation("feast-configuration", first).unwrap();

    let current: Vec<RelationData> = seen.lock().iter().map(|e| e.current.clone()).collect();
    assert_eq!(
        current,
        vec![
            data(&[("registry_host", "a")]),
            data(&[("registry_host", "a")]),
            data(&[("registry_host", "a")]),
            RelationData::new(),
        ]
    );
}

#[test]
fn unreadable_snapshot_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = read_snapshot(&path).unwrap_err();
    assert!(err.to_string().starts_with("Snapshot format error (Parsing "));
    assert!(read_snapshot(dir.path().join("missing.json")).is_err());
}
