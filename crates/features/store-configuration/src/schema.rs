//! # Store configuration schema
//!
//! [`FeastStoreConfiguration`] is the only entity exchanged over the
//! `feast-configuration` relation: fifteen required fields describing the
//! registry, offline store and online store databases.
//!
//! ## Validation order
//! 1. The key set must match the declared fields exactly. Missing and
//!    unexpected keys are collected together.
//! 2. Fields are then checked one by one in declared order and the first
//!    failure is reported. Port fields accept an integer or a base-10 string.

use crate::error::StoreConfigurationError;
use feast_domain::relation::RelationData;
use serde_json::{Map, Value};
use std::fmt;

/// Semantic kind of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Port,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "string",
            Self::Port => "integer",
        })
    }
}

/// Declared fields, in order.
pub const FIELDS: [(&str, FieldKind); 15] = [
    ("registry_user", FieldKind::Text),
    ("registry_password", FieldKind::Text),
    ("registry_host", FieldKind::Text),
    ("registry_port", FieldKind::Port),
    ("registry_database", FieldKind::Text),
    ("offline_store_host", FieldKind::Text),
    ("offline_store_port", FieldKind::Port),
    ("offline_store_database", FieldKind::Text),
    ("offline_store_user", FieldKind::Text),
    ("offline_store_password", FieldKind::Text),
    ("online_store_host", FieldKind::Text),
    ("online_store_port", FieldKind::Port),
    ("online_store_database", FieldKind::Text),
    ("online_store_user", FieldKind::Text),
    ("online_store_password", FieldKind::Text),
];

/// Why a mapping could not be turned into a [`FeastStoreConfiguration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The key set differs from the declared fields.
    /// `missing` follows declared order, `unexpected` is sorted.
    FieldSet { missing: Vec<&'static str>, unexpected: Vec<String> },
    /// A port field holds text that is not a base-10 integer.
    NotAnInteger { field: &'static str, value: String },
    /// A field holds a value of the wrong kind, or a port outside `0..=65535`.
    TypeMismatch { field: &'static str, expected: FieldKind, actual: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldSet { missing, unexpected } => {
                let mut parts = Vec::with_capacity(2);
                if !missing.is_empty() {
                    parts.push(format!("missing required field(s): {}", missing.join(", ")));
                }
                if !unexpected.is_empty() {
                    parts.push(format!("unexpected field(s): {}", unexpected.join(", ")));
                }
                f.write_str(&parts.join("; "))
            },
            Self::NotAnInteger { field, value } => {
                write!(f, "{field} must be an int or a string representing an int (got \"{value}\")")
            },
            Self::TypeMismatch { field, expected, actual } => {
                write!(f, "{field} must be of type {expected} (got {actual})")
            },
        }
    }
}

/// Connection parameters of one Postgres database.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConnection {
    host: String,
    port: u16,
    database: String,
    user: String,
    password: String,
}

impl StoreConnection {
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for StoreConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConnection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Validated Feast store configuration.
///
/// Can only be obtained through validation, so every instance is complete
/// and well typed. Compared by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeastStoreConfiguration {
    registry: StoreConnection,
    offline_store: StoreConnection,
    online_store: StoreConnection,
}

impl FeastStoreConfiguration {
    /// Validates a mapping of dynamic values.
    ///
    /// # Errors
    /// Returns [`StoreConfigurationError::DataInvalid`] with the first
    /// [`Violation`] found.
    pub fn from_values(values: &Map<String, Value>) -> Result<Self, StoreConfigurationError> {
        check_field_set(values)?;

        let text = |field| text_field(values, field);
        let port = |field| port_field(values, field);

        // Evaluated in declared order so the first failing field wins.
        let registry_user = text("registry_user")?;
        let registry_password = text("registry_password")?;
        let registry_host = text("registry_host")?;
        let registry_port = port("registry_port")?;
        let registry_database = text("registry_database")?;
        let offline_store_host = text("offline_store_host")?;
        let offline_store_port = port("offline_store_port")?;
        let offline_store_database = text("offline_store_database")?;
        let offline_store_user = text("offline_store_user")?;
        let offline_store_password = text("offline_store_password")?;
        let online_store_host = text("online_store_host")?;
        let online_store_port = port("online_store_port")?;
        let online_store_database = text("online_store_database")?;
        let online_store_user = text("online_store_user")?;
        let online_store_password = text("online_store_password")?;

        Ok(Self {
            registry: StoreConnection {
                host: registry_host,
                port: registry_port,
                database: registry_database,
                user: registry_user,
                password: registry_password,
            },
            offline_store: StoreConnection {
                host: offline_store_host,
                port: offline_store_port,
                database: offline_store_database,
                user: offline_store_user,
                password: offline_store_password,
            },
            online_store: StoreConnection {
                host: online_store_host,
                port: online_store_port,
                database: online_store_database,
                user: online_store_user,
                password: online_store_password,
            },
        })
    }

    /// Validates a relation data bag, where every value is text.
    ///
    /// # Errors
    /// See [`FeastStoreConfiguration::from_values`].
    pub fn from_relation_data(data: &RelationData) -> Result<Self, StoreConfigurationError> {
        let values: Map<String, Value> =
            data.iter().map(|(k, v)| (k.clone(), Value::String(v.clone()))).collect();
        Self::from_values(&values)
    }

    /// Flattens the configuration into the fifteen relation data keys.
    /// Ports are written in base 10.
    #[must_use]
    pub fn to_relation_data(&self) -> RelationData {
        let mut data = RelationData::new();
        for (prefix, conn) in [
            ("registry", &self.registry),
            ("offline_store", &self.offline_store),
            ("online_store", &self.online_store),
        ] {
            data.insert(format!("{prefix}_host"), conn.host.clone());
            data.insert(format!("{prefix}_port"), conn.port.to_string());
            data.insert(format!("{prefix}_database"), conn.database.clone());
            data.insert(format!("{prefix}_user"), conn.user.clone());
            data.insert(format!("{prefix}_password"), conn.password.clone());
        }
        data
    }

    #[must_use]
    pub const fn registry(&self) -> &StoreConnection {
        &self.registry
    }

    #[must_use]
    pub const fn offline_store(&self) -> &StoreConnection {
        &self.offline_store
    }

    #[must_use]
    pub const fn online_store(&self) -> &StoreConnection {
        &self.online_store
    }
}

impl TryFrom<&RelationData> for FeastStoreConfiguration {
    type Error = StoreConfigurationError;

    fn try_from(data: &RelationData) -> Result<Self, Self::Error> {
        Self::from_relation_data(data)
    }
}

fn check_field_set(values: &Map<String, Value>) -> Result<(), Violation> {
    let missing: Vec<&'static str> =
        FIELDS.iter().map(|(name, _)| *name).filter(|name| !values.contains_key(*name)).collect();

    let mut unexpected: Vec<String> = values
        .keys()
        .filter(|key| !FIELDS.iter().any(|(name, _)| *name == key.as_str()))
        .cloned()
        .collect();
    unexpected.sort();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(Violation::FieldSet { missing, unexpected })
    }
}

fn text_field(values: &Map<String, Value>, field: &'static str) -> Result<String, Violation> {
    match values.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        other => Err(mismatch(field, FieldKind::Text, other)),
    }
}

fn port_field(values: &Map<String, Value>, field: &'static str) -> Result<u16, Violation> {
    let value = values.get(field);
    let parsed: i128 = match value {
        Some(Value::String(raw)) => raw
            .parse()
            .map_err(|_| Violation::NotAnInteger { field, value: raw.clone() })?,
        Some(Value::Number(n)) => match (n.as_u64(), n.as_i64()) {
            (Some(u), _) => i128::from(u),
            (None, Some(i)) => i128::from(i),
            (None, None) => return Err(mismatch(field, FieldKind::Port, value)),
        },
        other => return Err(mismatch(field, FieldKind::Port, other)),
    };

    u16::try_from(parsed).map_err(|_| Violation::TypeMismatch {
        field,
        expected: FieldKind::Port,
        actual: format!("integer {parsed} outside 0..=65535"),
    })
}

fn mismatch(field: &'static str, expected: FieldKind, actual: Option<&Value>) -> Violation {
    let actual = match actual {
        None | Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(n)) if n.is_f64() => "float",
        Some(Value::Number(_)) => "integer",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    };
    Violation::TypeMismatch { field, expected, actual: actual.to_owned() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_messages() {
        let both = Violation::FieldSet {
            missing: vec!["registry_host", "registry_port"],
            unexpected: vec!["extra".to_owned()],
        };
        assert_eq!(
            both.to_string(),
            "missing required field(s): registry_host, registry_port; unexpected field(s): extra"
        );

        let nan = Violation::NotAnInteger { field: "online_store_port", value: "abc".to_owned() };
        assert_eq!(
            nan.to_string(),
            "online_store_port must be an int or a string representing an int (got \"abc\")"
        );

        let kind = Violation::TypeMismatch {
            field: "registry_user",
            expected: FieldKind::Text,
            actual: "integer".to_owned(),
        };
        assert_eq!(kind.to_string(), "registry_user must be of type string (got integer)");
    }

    #[test]
    fn declared_fields_are_unique() {
        for (i, (name, _)) in FIELDS.iter().enumerate() {
            assert!(!FIELDS[i + 1..].iter().any(|(other, _)| other == name), "{name} duplicated");
        }
        assert_eq!(FIELDS.iter().filter(|(_, kind)| *kind == FieldKind::Port).count(), 3);
    }

    #[test]
    fn debug_hides_passwords() {
        let conn = StoreConnection {
            host: "h".to_owned(),
            port: 5432,
            database: "d".to_owned(),
            user: "u".to_owned(),
            password: "secret".to_owned(),
        };
        let rendered = format!("{conn:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("5432"));
    }
}
