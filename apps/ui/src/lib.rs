//! Feast UI charm.
//!
//! Receives the store configuration from the integrator, writes
//! `feature_store.yaml` for the `feast ui` process and announces the UI to the
//! ingress and the Kubeflow dashboard.

pub mod components;
mod error;
pub mod layer;

pub use error::{UiError, UiErrorExt};

use components::{
    DashboardLinksSender, DocumentSlot, IngressData, IngressSender, Relations, StoreConfigurationReceiver,
    UiWorkload, feast_links,
};
use feast::domain::config::UiConfig;
use feast::domain::relation::ModelSnapshot;
use feast::events::EventBus;
use feast::kernel::reconcile::{LeadershipGate, ReconcileReport, Reconciler};
use feast::kernel::relation::MemoryRelations;
use feast::store_configuration::StoreConfigurationRequirer;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

pub type Requirer = StoreConfigurationRequirer<Relations>;

/// Builds the UI's component graph over `relations`.
#[must_use]
pub fn reconciler(config: &UiConfig, relations: &Relations, requirer: Arc<Requirer>, leader: bool) -> Reconciler {
    let names = &config.relations;
    let document = DocumentSlot::default();
    let gate = LeadershipGate::<bool>::NAME;
    let route = IngressData {
        prefix: config.ingress.prefix.clone(),
        rewrite: config.ingress.rewrite.clone(),
        service: config.app_name.clone(),
        namespace: config.namespace.clone(),
        port: config.http_port,
    };

    Reconciler::new()
        .with(LeadershipGate::new(leader), &[])
        .with(IngressSender::new(relations.clone(), &names.ingress, route), &[gate])
        .with(StoreConfigurationReceiver::new(requirer, document.clone()), &[gate])
        .with(
            UiWorkload::new(&config.destination_path, &config.service_name, document),
            &[gate, StoreConfigurationReceiver::NAME],
        )
        .with(
            DashboardLinksSender::new(
                relations.clone(),
                &names.dashboard_links,
                feast_links(&config.ingress.prefix),
            ),
            &[gate],
        )
}

/// Result of one reconciliation pass.
#[derive(Debug)]
pub struct Outcome {
    pub snapshot: ModelSnapshot,
    pub report: ReconcileReport,
    /// Store configuration updates observed while loading the snapshot.
    pub updates: usize,
}

/// Runs one pass against `snapshot` and returns the updated model.
#[must_use]
pub fn reconcile(config: &UiConfig, snapshot: &ModelSnapshot) -> Outcome {
    let store = MemoryRelations::from_snapshot(snapshot, EventBus::new());
    let relations: Relations = Arc::new(store.clone());
    let requirer =
        Arc::new(Requirer::new(relations.clone()).relation_name(&config.relations.store_configuration));

    let updates = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&updates);
    requirer.on_updated(move |event| {
        info!(relation = %event.relation, keys = event.snapshot.len(), "Store configuration updated");
        seen.fetch_add(1, Ordering::Relaxed);
    });
    store.replay();

    let report = reconciler(config, &relations, requirer, snapshot.leader).run();
    Outcome { snapshot: store.snapshot(snapshot.leader), report, updates: updates.load(Ordering::Relaxed) }
}
