//! Feast integrator charm.
//!
//! Collects PostgreSQL connection details for the registry, offline store and
//! online store, renders `feature_store.yaml` into a Kubernetes Secret with a
//! matching PodDefault, and publishes the store configuration to related Feast
//! applications.

pub mod components;
mod error;
pub mod manifests;

pub use error::{IntegratorError, IntegratorErrorExt};

use components::{
    PodDefaultSender, PostgresRequirer, Relations, SecretSender, StoreConfigurationSender,
    StoreContext,
};
use feast::domain::config::IntegratorConfig;
use feast::domain::relation::ModelSnapshot;
use feast::events::EventBus;
use feast::kernel::reconcile::{LeadershipGate, ReconcileReport, Reconciler};
use feast::kernel::relation::MemoryRelations;
use std::sync::Arc;

/// Database prefixes, which are also the requested database names.
pub const OFFLINE_STORE_PREFIX: &str = "offline_store";
pub const ONLINE_STORE_PREFIX: &str = "online_store";
pub const REGISTRY_PREFIX: &str = "registry";

/// Builds the integrator's component graph over `relations`.
#[must_use]
pub fn reconciler(config: &IntegratorConfig, relations: &Relations, leader: bool) -> Reconciler {
    let names = &config.relations;
    let context = StoreContext::default();
    let requirer =
        |relation: &str, prefix: &str| PostgresRequirer::new(relations.clone(), relation, prefix, context.clone());
    let databases = [names.offline_store.as_str(), names.online_store.as_str(), names.registry.as_str()];
    let gate = [LeadershipGate::<bool>::NAME];

    Reconciler::new()
        .with(LeadershipGate::new(leader), &[])
        .with(requirer(&names.offline_store, OFFLINE_STORE_PREFIX), &gate)
        .with(requirer(&names.online_store, ONLINE_STORE_PREFIX), &gate)
        .with(requirer(&names.registry, REGISTRY_PREFIX), &gate)
        .with(
            SecretSender::new(
                relations.clone(),
                &names.secrets,
                &config.namespace,
                &config.secret_name,
                context.clone(),
            ),
            &databases,
        )
        .with(
            PodDefaultSender::new(
                relations.clone(),
                &names.pod_defaults,
                &config.namespace,
                &config.app_name,
                &config.secret_name,
            ),
            &[SecretSender::NAME],
        )
        .with(
            StoreConfigurationSender::new(relations.clone(), &names.store_configuration, leader, context),
            &databases,
        )
}

/// Result of one reconciliation pass.
#[derive(Debug)]
pub struct Outcome {
    pub snapshot: ModelSnapshot,
    pub report: ReconcileReport,
}

/// Runs one pass against `snapshot` and returns the updated model.
#[must_use]
pub fn reconcile(config: &IntegratorConfig, snapshot: &ModelSnapshot) -> Outcome {
    let store = MemoryRelations::from_snapshot(snapshot, EventBus::new());
    let relations: Relations = Arc::new(store.clone());
    let report = reconciler(config, &relations, snapshot.leader).run();
    Outcome { snapshot: store.snapshot(snapshot.leader), report }
}
