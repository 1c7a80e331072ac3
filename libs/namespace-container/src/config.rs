//! Configuration for the namespace container.
//!
//! The container can be configured in two ways:
//!
//! 1. **Embedded**: extracted from the `namespace_container` key of a host
//!    application's [`Figment`]. A missing key falls back to defaults.
//! 2. **Standalone**: loaded from a YAML file, with `NAMESPACE_CONTAINER_`
//!    prefixed environment variables layered on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::{Deserialize, Serialize};

/// Key of the container section in a host configuration.
pub const CONFIG_KEY: &str = "namespace_container";

/// Prefix of environment variables overriding standalone configuration.
pub const ENV_PREFIX: &str = "NAMESPACE_CONTAINER_";

/// Configuration error for container config loading.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("invalid namespace container config: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Container configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
    /// Factory used for namespaces without an explicit entry in
    /// `namespace_factories`.
    pub default_factory: Option<String>,

    /// Factory name per namespace name.
    pub namespace_factories: HashMap<String, String>,

    /// When set, only these factories may be instantiated.
    pub allowed_factories: Option<Vec<String>>,
}

impl ContainerConfig {
    /// Factory configured for the namespace, falling back to `default_factory`.
    #[must_use]
    pub fn factory_for(&self, namespace_name: &str) -> Option<&str> {
        self.namespace_factories
            .get(namespace_name)
            .or(self.default_factory.as_ref())
            .map(String::as_str)
    }

    /// Extract the `namespace_container` section of a host configuration.
    ///
    /// Returns defaults when the section is absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the section exists but cannot be
    /// deserialized.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        if !figment.contains(CONFIG_KEY) {
            tracing::debug!(key = CONFIG_KEY, "No container config section; using defaults");
            return Ok(Self::default());
        }

        figment
            .extract_inner(CONFIG_KEY)
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Load standalone configuration from a YAML file plus environment.
    ///
    /// Nested keys use `__` in variable names, e.g.
    /// `NAMESPACE_CONTAINER_NAMESPACE_FACTORIES__Staging=noop`. Only the field
    /// name is case-insensitive; map keys such as namespace names keep their
    /// case.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileNotFound` if `path` does not exist and
    /// `ConfigError::Invalid` if the merged configuration is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let config: Self = Figment::new()
            .merge(Yaml::file(path))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .lowercase(false)
                    .map(|key| env_key_path(key.as_str()).into()),
            )
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))?;

        tracing::info!(
            path = %path.display(),
            default_factory = ?config.default_factory,
            namespace_overrides = config.namespace_factories.len(),
            "Loaded namespace container config"
        );
        Ok(config)
    }
}

/// `NAMESPACE_FACTORIES__Staging` -> `namespace_factories.Staging`.
fn env_key_path(key: &str) -> String {
    match key.split_once("__") {
        Some((field, rest)) => format!("{}.{}", field.to_ascii_lowercase(), rest.replace("__", ".")),
        None => key.to_ascii_lowercase(),
    }
}
