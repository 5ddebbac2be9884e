#![allow(dead_code, unreachable_pub)]

use feast_domain::relation::RelationData;
use feast_store_configuration::schema::FIELDS;

/// A complete, valid bag using the `u`/`p`/`h`/`d` registry values.
pub fn valid_data() -> RelationData {
    let mut data = RelationData::new();
    for (key, value) in [
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
    ] {
        data.insert(key.to_owned(), value.to_owned());
    }
    assert_eq!(data.len(), FIELDS.len());
    data
}

pub fn field_names() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|(name, _)| *name)
}
