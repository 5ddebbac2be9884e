use super::{Relations, send_to_all};
use feast::domain::relation::RelationData;
use feast::kernel::reconcile::Component;
use feast::kernel::status::Status;
use serde::Serialize;
use tracing::debug;

/// Key read by the dashboard.
pub const DASHBOARD_LINKS_KEY: &str = "dashboard_links";

/// Sidebar entry shown by the Kubeflow dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardLink {
    pub text: String,
    pub link: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: String,
    pub location: String,
}

/// The single "Feast" sidebar link.
#[must_use]
pub fn feast_links(prefix: &str) -> Vec<DashboardLink> {
    vec![DashboardLink {
        text: "Feast".to_owned(),
        link: format!("{}/", prefix.trim_end_matches('/')),
        kind: "item".to_owned(),
        icon: "device:data-usage".to_owned(),
        location: "external".to_owned(),
    }]
}

/// Publishes the sidebar links on every dashboard relation.
#[derive(Debug)]
pub struct DashboardLinksSender {
    relations: Relations,
    relation: String,
    links: Vec<DashboardLink>,
}

impl DashboardLinksSender {
    pub const NAME: &'static str = "dashboard-links";

    pub fn new(relations: Relations, relation: impl Into<String>, links: Vec<DashboardLink>) -> Self {
        Self { relations, relation: relation.into(), links }
    }
}

impl Component for DashboardLinksSender {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reconcile(&mut self) -> Result<(), Status> {
        let sent = serde_json::to_string(&self.links)
            .map_err(crate::UiError::from)
            .and_then(|links| {
                let data = RelationData::from([(DASHBOARD_LINKS_KEY.to_owned(), links)]);
                send_to_all(&self.relations, &self.relation, &data)
            })
            .map_err(|e| Status::error(format!("Failed to send data on {} relation: {e}", self.relation)))?;
        debug!(relation = %self.relation, relations = sent, links = self.links.len(), "Dashboard links sent");
        Ok(())
    }
}
