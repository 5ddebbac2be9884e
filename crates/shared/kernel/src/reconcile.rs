//! # Reconciler
//!
//! A charm is a list of components visited in insertion order on every hook.
//! A component runs only when all of its dependencies ended the current pass
//! `Active`; otherwise it is reported as waiting on them. The unit status is
//! the highest-priority non-active status of the pass.

use crate::leadership::Leadership;
use crate::status::Status;
use tracing::{debug, info};

/// One unit of charm logic.
pub trait Component: Send {
    /// Unique name within a [`Reconciler`], used for dependencies and logs.
    fn name(&self) -> &str;

    /// Does the component's work.
    ///
    /// # Errors
    /// Returns the status to report when the work cannot be completed.
    fn reconcile(&mut self) -> Result<(), Status>;

    /// Status after a successful [`Component::reconcile`].
    fn status(&self) -> Status {
        Status::Active
    }
}

struct Entry {
    component: Box<dyn Component>,
    depends_on: Vec<String>,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("component", &self.component.name())
            .field("depends_on", &self.depends_on)
            .finish()
    }
}

/// Runs components in order, honouring dependencies.
#[derive(Debug, Default)]
pub struct Reconciler {
    entries: Vec<Entry>,
}

impl Reconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a component that runs only when every component named in
    /// `depends_on` is `Active` in the same pass.
    #[must_use]
    pub fn with(mut self, component: impl Component + 'static, depends_on: &[&str]) -> Self {
        self.entries.push(Entry {
            component: Box::new(component),
            depends_on: depends_on.iter().map(|d| (*d).to_owned()).collect(),
        });
        self
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Performs one reconciliation pass.
    pub fn run(&mut self) -> ReconcileReport {
        let mut statuses: Vec<(String, Status)> = Vec::with_capacity(self.entries.len());

        for entry in &mut self.entries {
            let name = entry.component.name().to_owned();
            let pending: Vec<&str> = entry
                .depends_on
                .iter()
                .filter(|dep| {
                    !statuses.iter().any(|(done, status)| done == *dep && status.is_active())
                })
                .map(String::as_str)
                .collect();

            let status = if pending.is_empty() {
                match entry.component.reconcile() {
                    Ok(()) => entry.component.status(),
                    Err(status) => status,
                }
            } else {
                debug!(component = %name, pending = ?pending, "Skipping component");
                Status::waiting(format!("waiting on dependencies: {}", pending.join(", ")))
            };

            info!(component = %name, status = %status, "Component reconciled");
            statuses.push((name, status));
        }

        ReconcileReport { statuses }
    }
}

/// Outcome of one [`Reconciler::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub statuses: Vec<(String, Status)>,
}

impl ReconcileReport {
    /// Status to show for the unit.
    #[must_use]
    pub fn unit_status(&self) -> Status {
        Status::worst(self.statuses.iter().map(|(_, s)| s))
    }

    #[must_use]
    pub fn status_of(&self, component: &str) -> Option<&Status> {
        self.statuses.iter().find(|(name, _)| name == component).map(|(_, s)| s)
    }
}

/// Component that is active only on the leader unit.
///
/// Register it first and make leader-only components depend on it.
#[derive(Debug)]
pub struct LeadershipGate<L> {
    leadership: L,
}

impl<L: Leadership> LeadershipGate<L> {
    pub const NAME: &'static str = "leadership-gate";

    pub const fn new(leadership: L) -> Self {
        Self { leadership }
    }
}

impl<L: Leadership> Component for LeadershipGate<L> {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reconcile(&mut self) -> Result<(), Status> {
        if self.leadership.is_leader() {
            Ok(())
        } else {
            Err(Status::waiting("Waiting for leadership"))
        }
    }
}
