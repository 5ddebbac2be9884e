//! Kubernetes manifests sent to the resource dispatcher.
//!
//! The dispatcher reads a JSON list of manifests from the
//! `kubernetes_manifests` key of our application bag.

use crate::error::IntegratorError;
use feast::domain::constants::FEATURE_STORE_FILE;
use feast::domain::relation::RelationData;
use serde_json::{Value, json};

/// Key read by the resource dispatcher.
pub const MANIFESTS_KEY: &str = "kubernetes_manifests";
/// Where notebooks find the mounted secret.
pub const FEAST_MOUNT_PATH: &str = "/home/jovyan/.feast";
/// Environment variable pointing Feast at `feature_store.yaml`.
pub const FEAST_PATH_ENV: &str = "FEAST_FS_YAML_FILE_PATH";
/// Pod label that opts a pod into the PodDefault.
pub const ACCESS_LABEL: &str = "access-feast";

/// Opaque Secret carrying `feature_store.yaml`.
#[must_use]
pub fn feature_store_secret(namespace: &str, secret_name: &str, document: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": { "name": secret_name, "namespace": namespace },
        "type": "Opaque",
        "stringData": { FEATURE_STORE_FILE: document },
    })
}

/// PodDefault mounting the feature store secret into labelled pods.
#[must_use]
pub fn feast_access_pod_default(namespace: &str, app_name: &str, secret_name: &str) -> Value {
    json!({
        "apiVersion": "kubeflow.org/v1alpha1",
        "kind": "PodDefault",
        "metadata": { "name": format!("{app_name}-feast-access"), "namespace": namespace },
        "spec": {
            "desc": "Allow access to the Feast feature store",
            "selector": { "matchLabels": { ACCESS_LABEL: "true" } },
            "env": [
                { "name": FEAST_PATH_ENV, "value": format!("{FEAST_MOUNT_PATH}/{FEATURE_STORE_FILE}") }
            ],
            "volumeMounts": [
                { "name": secret_name, "mountPath": FEAST_MOUNT_PATH, "readOnly": true }
            ],
            "volumes": [
                { "name": secret_name, "secret": { "secretName": secret_name } }
            ],
        },
    })
}

/// Relation data carrying `manifests` for the dispatcher.
///
/// # Errors
/// Returns [`IntegratorError::Manifest`] if the list cannot be serialized.
pub fn manifests_data(manifests: &[Value]) -> Result<RelationData, IntegratorError> {
    let encoded = serde_json::to_string(manifests)?;
    Ok(RelationData::from([(MANIFESTS_KEY.to_owned(), encoded)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_embeds_document() {
        let secret = feature_store_secret("kubeflow", "feature-store-yaml", "project: feast_project\n");
        assert_eq!(secret["kind"], "Secret");
        assert_eq!(secret["metadata"]["namespace"], "kubeflow");
        assert_eq!(secret["stringData"]["feature_store.yaml"], "project: feast_project\n");
    }

    #[test]
    fn pod_default_points_at_mounted_file() {
        let pd = feast_access_pod_default("kubeflow", "feast-integrator", "feature-store-yaml");
        assert_eq!(pd["metadata"]["name"], "feast-integrator-feast-access");
        assert_eq!(pd["metadata"]["namespace"], "kubeflow");
        assert_eq!(pd["spec"]["selector"]["matchLabels"]["access-feast"], "true");
        assert_eq!(pd["spec"]["env"][0]["value"], "/home/jovyan/.feast/feature_store.yaml");
        assert_eq!(pd["spec"]["volumes"][0]["secret"]["secretName"], "feature-store-yaml");
    }

    #[test]
    fn manifests_are_a_json_list() {
        let data = manifests_data(&[json!({ "kind": "Secret" })]).unwrap();
        assert_eq!(data[MANIFESTS_KEY], r#"[{"kind":"Secret"}]"#);
    }
}
