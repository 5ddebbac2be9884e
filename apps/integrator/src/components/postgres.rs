use super::{Relations, StoreContext};
use feast::domain::relation::RelationData;
use feast::kernel::reconcile::Component;
use feast::kernel::status::Status;
use tracing::{debug, info};

/// Requests a database from PostgreSQL over `relation` and exposes the
/// connection details as `<prefix>_host|port|database|user|password`.
#[derive(Debug)]
pub struct PostgresRequirer {
    relations: Relations,
    relation: String,
    prefix: String,
    context: StoreContext,
}

impl PostgresRequirer {
    /// `prefix` doubles as the requested database name.
    pub fn new(
        relations: Relations,
        relation: impl Into<String>,
        prefix: impl Into<String>,
        context: StoreContext,
    ) -> Self {
        Self { relations, relation: relation.into(), prefix: prefix.into(), context }
    }

    fn request_database(&self, id: u32) -> Result<(), Status> {
        let local = self.relations.local_app_data(&self.relation, id).unwrap_or_default();
        if local.get("database") == Some(&self.prefix) {
            return Ok(());
        }

        debug!(relation = %self.relation, database = %self.prefix, "Requesting database");
        let request = RelationData::from([("database".to_owned(), self.prefix.clone())]);
        self.relations
            .update_local_app_data(&self.relation, id, request)
            .map_err(|e| Status::error(format!("Failed to request database on {}: {e}", self.relation)))
    }
}

impl Component for PostgresRequirer {
    fn name(&self) -> &str {
        &self.relation
    }

    fn reconcile(&mut self) -> Result<(), Status> {
        let Some(id) = self.relations.first_relation(&self.relation) else {
            self.context.clear(&self.prefix);
            return Err(Status::blocked(format!("Please add the missing relation: {}", self.relation)));
        };

        self.request_database(id)?;

        let remote = self.relations.remote_app_data(&self.relation, id).unwrap_or_default();
        match parse_database_data(&self.prefix, &remote) {
            Some(data) => {
                info!(relation = %self.relation, database = %self.prefix, "PostgreSQL connection details available");
                self.context.replace(&self.prefix, data);
                Ok(())
            },
            None => {
                self.context.clear(&self.prefix);
                Err(Status::waiting(format!("Waiting for {} relation data", self.relation)))
            },
        }
    }
}

/// Turns a PostgreSQL provider bag into prefixed connection details.
///
/// `endpoints` may list several `host:port` pairs separated by commas; the
/// first one is used. Returns `None` until every key is present.
#[must_use]
pub fn parse_database_data(prefix: &str, remote: &RelationData) -> Option<RelationData> {
    let endpoint = remote.get("endpoints")?.split(',').next()?.trim();
    let (host, port) = endpoint.rsplit_once(':')?;

    let fields = [
        ("host", host),
        ("port", port),
        ("database", remote.get("database")?.as_str()),
        ("user", remote.get("username")?.as_str()),
        ("password", remote.get("password")?.as_str()),
    ];
    Some(fields.into_iter().map(|(key, value)| (format!("{prefix}_{key}"), value.to_owned())).collect())
}
