use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One application data bag: string keys to string values.
///
/// Ordered so that snapshots and logs are deterministic.
pub type RelationData = BTreeMap<String, String>;

/// Identifier of one established relation.
pub type RelationId = u32;

/// Serializable state of a single relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationSnapshot {
    pub id: RelationId,
    pub name: String,
    pub remote_app: String,
    pub local_app_data: RelationData,
    pub remote_app_data: RelationData,
}

/// Serializable state of everything a charm can see during one hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSnapshot {
    pub leader: bool,
    pub relations: Vec<RelationSnapshot>,
}
