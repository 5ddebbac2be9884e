mod common;

use common::{field_names, valid_data};
use feast_store_configuration::schema::FieldKind;
use feast_store_configuration::{FeastStoreConfiguration, StoreConfigurationError, Violation};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn violation(result: Result<FeastStoreConfiguration, StoreConfigurationError>) -> Violation {
    match result {
        Err(StoreConfigurationError::DataInvalid { violation, .. }) => violation,
        other => panic!("expected DataInvalid, got {other:?}"),
    }
}

fn as_values(data: &feast_domain::relation::RelationData) -> Map<String, Value> {
    data.iter().map(|(k, v)| (k.clone(), Value::String(v.clone()))).collect()
}

#[test]
fn valid_bag_is_accepted() {
    let cfg = FeastStoreConfiguration::from_relation_data(&valid_data()).unwrap();
    assert_eq!(cfg.registry().user(), "u");
    assert_eq!(cfg.registry().port(), 5432);
    assert_eq!(cfg.offline_store().database(), "offline_db");
    assert_eq!(cfg.online_store().password(), "online_pw");
    assert_eq!(cfg.online_store().port(), 5434);
}

#[test]
fn each_missing_field_is_reported() {
    for field in field_names() {
        let mut data = valid_data();
        data.remove(field);

        let found = violation(FeastStoreConfiguration::from_relation_data(&data));
        assert_eq!(found, Violation::FieldSet { missing: vec![field], unexpected: vec![] }, "{field}");
        assert_eq!(found.to_string(), format!("missing required field(s): {field}"));
    }
}

#[test]
fn each_extra_field_is_reported() {
    for field in field_names() {
        let mut data = valid_data();
        let extra = format!("{field}_extra");
        data.insert(extra.clone(), "x".to_owned());

        let found = violation(FeastStoreConfiguration::from_relation_data(&data));
        assert_eq!(found, Violation::FieldSet { missing: vec![], unexpected: vec![extra.clone()] });
        assert_eq!(found.to_string(), format!("unexpected field(s): {extra}"));
    }
}

#[test]
fn missing_and_unexpected_are_reported_together() {
    let mut data = valid_data();
    data.remove("online_store_user");
    data.remove("registry_host");
    data.insert("zeta".to_owned(), "1".to_owned());
    data.insert("alpha".to_owned(), "2".to_owned());

    let found = violation(FeastStoreConfiguration::from_relation_data(&data));
    assert_eq!(
        found,
        Violation::FieldSet {
            missing: vec!["registry_host", "online_store_user"],
            unexpected: vec!["alpha".to_owned(), "zeta".to_owned()],
        }
    );
    assert_eq!(
        found.to_string(),
        "missing required field(s): registry_host, online_store_user; unexpected field(s): alpha, zeta"
    );
}

#[test]
fn empty_bag_lists_every_field() {
    let found = violation(FeastStoreConfiguration::from_values(&Map::new()));
    let Violation::FieldSet { missing, unexpected } = found else {
        panic!("expected a field set violation");
    };
    assert_eq!(missing, field_names().collect::<Vec<_>>());
    assert!(unexpected.is_empty());
}

#[test]
fn textual_port_is_coerced() {
    let cfg = FeastStoreConfiguration::from_relation_data(&valid_data()).unwrap();
    assert_eq!(cfg.registry().port(), 5432);
    assert_eq!(cfg.offline_store().port(), 5433);
}

#[test]
fn non_numeric_port_names_the_field() {
    let mut data = valid_data();
    data.insert("offline_store_port".to_owned(), "not-a-port".to_owned());

    let err = FeastStoreConfiguration::from_relation_data(&data).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid relation data: offline_store_port must be an int or a string representing an int (got \"not-a-port\")"
    );
}

#[test]
fn first_failing_field_in_declared_order_wins() {
    let mut data = valid_data();
    data.insert("online_store_port".to_owned(), "x".to_owned());
    data.insert("registry_port".to_owned(), "y".to_owned());

    let found = violation(FeastStoreConfiguration::from_relation_data(&data));
    assert_eq!(found, Violation::NotAnInteger { field: "registry_port", value: "y".to_owned() });
}

#[test]
fn whitespace_around_port_is_rejected() {
    let mut data = valid_data();
    data.insert("registry_port".to_owned(), " 5432".to_owned());
    assert!(matches!(
        violation(FeastStoreConfiguration::from_relation_data(&data)),
        Violation::NotAnInteger { field: "registry_port", .. }
    ));
}

#[test]
fn out_of_range_port_is_a_type_mismatch() {
    let mut data = valid_data();
    data.insert("online_store_port".to_owned(), "70000".to_owned());

    let found = violation(FeastStoreConfiguration::from_relation_data(&data));
    assert!(matches!(
        found,
        Violation::TypeMismatch { field: "online_store_port", expected: FieldKind::Port, .. }
    ));
}

#[test]
fn dynamic_values_are_kind_checked() {
    let mut values = as_values(&valid_data());
    values.insert("registry_port".to_owned(), json!(5432));
    values.insert("offline_store_port".to_owned(), json!(-1));
    assert!(matches!(
        violation(FeastStoreConfiguration::from_values(&values)),
        Violation::TypeMismatch { field: "offline_store_port", .. }
    ));

    let mut values = as_values(&valid_data());
    values.insert("registry_user".to_owned(), json!(42));
    let found = violation(FeastStoreConfiguration::from_values(&values));
    assert_eq!(
        found,
        Violation::TypeMismatch {
            field: "registry_user",
            expected: FieldKind::Text,
            actual: "integer".to_owned()
        }
    );

    let mut values = as_values(&valid_data());
    values.insert("online_store_port".to_owned(), json!(5432.5));
    assert_eq!(
        violation(FeastStoreConfiguration::from_values(&values)).to_string(),
        "online_store_port must be of type integer (got float)"
    );
}

#[test]
fn integer_ports_are_accepted_as_is() {
    let mut values = as_values(&valid_data());
    values.insert("registry_port".to_owned(), json!(6543));
    let cfg = FeastStoreConfiguration::from_values(&values).unwrap();
    assert_eq!(cfg.registry().port(), 6543);
}

#[test]
fn flattening_restores_the_bag() {
    let data = valid_data();
    let cfg = FeastStoreConfiguration::try_from(&data).unwrap();
    assert_eq!(cfg.to_relation_data(), data);
}

proptest! {
    #[test]
    fn any_port_text_coerces_back(port in any::<u16>()) {
        let mut data = valid_data();
        data.insert("registry_port".to_owned(), port.to_string());
        let cfg = FeastStoreConfiguration::from_relation_data(&data).unwrap();
        prop_assert_eq!(cfg.registry().port(), port);
    }

    #[test]
    fn non_digit_text_is_never_a_port(raw in "[a-z][a-z0-9-]{0,12}") {
        let mut data = valid_data();
        data.insert("online_store_port".to_owned(), raw.clone());
        let found = violation(FeastStoreConfiguration::from_relation_data(&data));
        prop_assert_eq!(found, Violation::NotAnInteger { field: "online_store_port", value: raw });
    }
}
