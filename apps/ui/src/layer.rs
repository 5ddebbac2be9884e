//! Process layer describing how the Feast UI runs inside its container.

use serde::Serialize;
use std::collections::BTreeMap;

pub const WORKING_DIR: &str = "/home/ubuntu";
pub const COMMAND: &str = "feast ui";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub summary: String,
    pub description: String,
    pub services: BTreeMap<String, Service>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Service {
    #[serde(rename = "override")]
    pub override_mode: String,
    pub summary: String,
    pub command: String,
    pub startup: String,
    pub working_dir: String,
}

/// Layer running `feast ui` as `service_name`.
#[must_use]
pub fn ui_layer(service_name: &str) -> Layer {
    let service = Service {
        override_mode: "replace".to_owned(),
        summary: format!("Entry point for {service_name} image"),
        command: COMMAND.to_owned(),
        startup: "enabled".to_owned(),
        working_dir: WORKING_DIR.to_owned(),
    };
    Layer {
        summary: format!("{service_name} layer"),
        description: format!("Process layer for {service_name}"),
        services: BTreeMap::from([(service_name.to_owned(), service)]),
    }
}
