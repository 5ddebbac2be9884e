//! Kernel utilities shared by the Feast charms.
//! Keep this crate lightweight: relation access, leadership, status reporting,
//! the component reconciler, and config loading.
//!
//! ## Relations
//! ```rust
//! use feast_kernel::relation::{MemoryRelations, RelationStore};
//!
//! let relations = MemoryRelations::default();
//! let id = relations.add_relation("feast-configuration", "feast-ui");
//! assert_eq!(relations.relation_ids("feast-configuration"), vec![id]);
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use feast_kernel::config::load_config;
//! use feast_kernel::domain::config::IntegratorConfig;
//!
//! let cfg: IntegratorConfig = load_config("integrator.toml").unwrap();
//! ```
pub mod config;
pub mod leadership;
pub mod reconcile;
pub mod relation;
pub mod status;

pub use feast_domain as domain;
pub use feast_event_bus as events;
