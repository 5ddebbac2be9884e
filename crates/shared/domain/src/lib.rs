//! # Domain Models
//!
//! Plain data shared by the Feast charm crates: charm configuration sections,
//! relation names, and the serializable relation snapshot.
//! Keep it lean: no I/O or validation here, only data and defaults.

pub mod config;
pub mod constants;
pub mod relation;
