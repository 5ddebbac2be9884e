use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `FEAST__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "FEAST";
const ENV_SEPARATOR: &str = "__";

/// Custom error type for config loading.
#[feast_derive::feast_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a charm configuration from a file with environment overrides.
///
/// Layers, lowest priority first:
/// 1. **File**: `path`, format picked from the extension (TOML, YAML, JSON).
/// 2. **Environment**: variables prefixed with `FEAST__`; nested keys are
///    separated by `__` (`FEAST__RELATIONS__INGRESS` maps to `relations.ingress`).
///
/// Missing keys fall back to the `Default` of `T` when it uses `#[serde(default)]`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing, malformed, or does
/// not match the structure of `T`.
///
/// # Example
/// ```rust,no_run
/// use feast_kernel::config::load_config;
/// use feast_kernel::domain::config::UiConfig;
///
/// let cfg: UiConfig = load_config("ui.toml").unwrap_or_default();
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load(path.as_ref(), None)
}

/// Same as [`load_config`], but reads overrides from `vars` instead of the
/// process environment. Keys still carry the `FEAST__` prefix.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_vars<T, I, K, V>(path: impl AsRef<Path>, vars: I) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: Map<String, String> = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
    load(path.as_ref(), Some(vars))
}

fn load<T: DeserializeOwned>(path: &Path, vars: Option<Map<String, String>>) -> Result<T, ConfigError> {
    let environment = Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
        .source(vars);

    info!(path = %path.display(), "Loading config");

    Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(environment)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
