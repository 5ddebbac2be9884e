use super::DocumentSlot;
use crate::error::{UiError, UiErrorExt};
use crate::layer::ui_layer;
use feast::kernel::reconcile::Component;
use feast::kernel::status::Status;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the process layer for `destination` is written.
#[must_use]
pub fn layer_path(destination: &Path) -> PathBuf {
    let mut path = OsString::from(destination.as_os_str());
    path.push(".layer.yaml");
    PathBuf::from(path)
}

/// Pushes `feature_store.yaml` and the process layer next to it.
#[derive(Debug)]
pub struct UiWorkload {
    destination: PathBuf,
    service_name: String,
    document: DocumentSlot,
}

impl UiWorkload {
    pub const NAME: &'static str = "feast-ui-pebble-service";

    pub fn new(destination: impl Into<PathBuf>, service_name: impl Into<String>, document: DocumentSlot) -> Self {
        Self { destination: destination.into(), service_name: service_name.into(), document }
    }

    fn push(&self, document: &str) -> Result<(), UiError> {
        if let Some(parent) = self.destination.parent() {
            fs::create_dir_all(parent).context(format!("Creating {}", parent.display()))?;
        }
        fs::write(&self.destination, document).context(format!("Writing {}", self.destination.display()))?;

        let layer = serde_yaml::to_string(&ui_layer(&self.service_name))?;
        let path = layer_path(&self.destination);
        fs::write(&path, layer).context(format!("Writing {}", path.display()))?;
        Ok(())
    }
}

impl Component for UiWorkload {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reconcile(&mut self) -> Result<(), Status> {
        let Some(document) = self.document.get() else {
            return Err(Status::waiting("feature_store.yaml is missing or empty"));
        };
        self.push(&document).map_err(|e| Status::error(format!("Failed to push workload files: {e}")))?;
        info!(path = %self.destination.display(), service = %self.service_name, "Feature store file pushed");
        Ok(())
    }
}
