//! # Feast store configuration
//!
//! Shares Feast feature store connection details between the integrator and
//! its consumers over the `feast-configuration` relation.
//!
//! ## Architecture
//!
//! 1.  **Schema ([`schema`]):** the fifteen required fields, port coercion and
//!     validation into an immutable [`FeastStoreConfiguration`].
//! 2.  **Provider ([`provider`]):** the leader flattens a configuration into its
//!     local application bag on every relation under the name.
//! 3.  **Requirer ([`requirer`]):** reads the remote bag back, validates it, and
//!     notifies observers when it changes.
//! 4.  **Renderer ([`render`]):** turns a configuration into `feature_store.yaml`.
//!
//! ## Example
//!
//! ```rust
//! use feast_kernel::relation::{MemoryRelations, RelationStore};
//! use feast_store_configuration::{
//!     FeastStoreConfiguration, PublishOutcome, StoreConfigurationProvider,
//! };
//!
//! # fn main() -> Result<(), feast_store_configuration::StoreConfigurationError> {
//! let relations = MemoryRelations::default();
//! let id = relations.add_relation("feast-configuration", "feast-ui");
//!
//! let data = feast_store_configuration::schema::FIELDS
//!     .iter()
//!     .map(|(name, _)| {
//!         let value = if name.ends_with("_port") { "5432" } else { "x" };
//!         ((*name).to_owned(), value.to_owned())
//!     })
//!     .collect();
//! let configuration = FeastStoreConfiguration::from_relation_data(&data)?;
//!
//! let provider = StoreConfigurationProvider::new(relations.clone(), true);
//! assert_eq!(provider.publish(&configuration)?, PublishOutcome::Published { relations: 1 });
//! assert_eq!(relations.local_app_data("feast-configuration", id), Some(data));
//! # Ok(())
//! # }
//! ```

mod error;
pub mod provider;
pub mod render;
pub mod requirer;
pub mod schema;

pub use crate::error::{StoreConfigurationError, StoreConfigurationErrorExt};
pub use crate::provider::{PublishOutcome, StoreConfigurationProvider};
pub use crate::render::render_feature_store;
pub use crate::requirer::{StoreConfigurationRequirer, StoreConfigurationUpdated};
pub use crate::schema::{FeastStoreConfiguration, StoreConnection, Violation};
pub use feast_domain::constants::STORE_CONFIGURATION_RELATION as DEFAULT_RELATION_NAME;
