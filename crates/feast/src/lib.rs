//! Facade crate for the Feast charm libraries.
//! Re-exports domain/kernel primitives and the store configuration feature.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `feast` (the `store-configuration` feature is on by default).
//! - Call [`logging::init`] with the `[logging]` section of a charm config.

pub use feast_domain as domain;
pub use feast_event_bus as events;
pub use feast_kernel as kernel;
#[cfg(feature = "store-configuration")]
pub use feast_store_configuration as store_configuration;

/// Feature registry for runtime introspection.
pub mod features {
    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "store-configuration")]
        "store-configuration",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Logger setup driven by [`LoggingConfig`](feast_domain::config::LoggingConfig).
pub mod logging {
    use feast_domain::config::LoggingConfig;
    use feast_logger::{Logger, LoggerBuilder, LoggerError, parse_level, parse_rotation};

    /// Translates a `[logging]` section into a [`LoggerBuilder`].
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an unknown level or rotation.
    pub fn builder(name: &str, config: &LoggingConfig) -> Result<LoggerBuilder, LoggerError> {
        let mut builder =
            Logger::builder(name).level(parse_level(&config.level)?).console(config.console);

        if let Some(filter) = &config.filter {
            builder = builder.env_filter(filter);
        }
        if let Some(path) = &config.path {
            builder = builder
                .path(path)
                .rotation(parse_rotation(&config.rotation)?)
                .max_files(config.max_files)
                .json(config.json);
        }
        Ok(builder)
    }

    /// Installs the global subscriber for a charm binary.
    ///
    /// # Errors
    /// See [`builder`] and [`LoggerBuilder::init`].
    pub fn init(name: &str, config: &LoggingConfig) -> Result<Logger, LoggerError> {
        builder(name, config)?.init()
    }
}
