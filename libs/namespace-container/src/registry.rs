//! Named instance factories.
//!
//! Plug-in style construction of instances from configuration: factories are
//! registered under a string identifier and instantiated by name. The
//! registry distinguishes an unknown name, a name the configuration does not
//! allow, and a factory that ran and failed.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use catalog_sdk::Namespace;
use parking_lot::RwLock;

use crate::config::ContainerConfig;
use crate::container::InstanceInitializer;
use crate::error::ContainerError;
use crate::lookup::CatalogLookup;

/// Constructor registered under a name.
pub type InstanceFactory<T> = Arc<dyn Fn() -> anyhow::Result<Arc<T>> + Send + Sync>;

/// Registry of instance factories keyed by name.
pub struct InstanceRegistry<T: ?Sized> {
    factories: RwLock<HashMap<String, InstanceFactory<T>>>,
    allowed: Option<HashSet<String>>,
}

impl<T: ?Sized> Default for InstanceRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> InstanceRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
            allowed: None,
        }
    }

    /// Empty registry restricted to `allowed_factories` when configured.
    #[must_use]
    pub fn from_config(cfg: &ContainerConfig) -> Self {
        let registry = Self::new();
        match &cfg.allowed_factories {
            Some(names) => registry.with_allowed(names.iter().cloned()),
            None => registry,
        }
    }

    /// Restrict instantiation to the given names.
    #[must_use]
    pub fn with_allowed<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Builder form of [`Self::register`].
    #[must_use]
    pub fn with_factory<F>(self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> anyhow::Result<Arc<T>> + Send + Sync + 'static,
    {
        self.register(name, factory);
        self
    }

    /// Register a factory; re-registering a name replaces the previous factory.
    pub fn register<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> anyhow::Result<Arc<T>> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(factory = %name, "Registering instance factory");
        self.factories.write().insert(name, Arc::new(factory));
    }

    /// Construct a new instance with the factory registered under `name`.
    ///
    /// # Errors
    ///
    /// - `FactoryNotFound` if nothing is registered under `name`
    /// - `FactoryAccessDenied` if an allow-list is set and excludes `name`
    /// - `ConstructionFailed` if the factory returns an error
    pub fn instantiate(&self, name: &str) -> Result<Arc<T>, ContainerError> {
        let factory = self
            .factories
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ContainerError::FactoryNotFound {
                name: name.to_owned(),
            })?;

        if let Some(allowed) = &self.allowed
            && !allowed.contains(name)
        {
            tracing::warn!(factory = %name, "Instance factory is not in the allow-list");
            return Err(ContainerError::FactoryAccessDenied {
                name: name.to_owned(),
            });
        }

        factory().map_err(|source| {
            tracing::warn!(factory = %name, error = %source, "Instance factory failed");
            ContainerError::ConstructionFailed {
                name: name.to_owned(),
                source,
            }
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.read().contains_key(name)
    }

    /// Registered factory names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }
}

/// Initializer that instantiates the factory configured for each namespace.
pub struct RegistryInitializer<T: ?Sized> {
    registry: Arc<InstanceRegistry<T>>,
    config: ContainerConfig,
}

impl<T: ?Sized> RegistryInitializer<T> {
    #[must_use]
    pub fn new(registry: Arc<InstanceRegistry<T>>, config: ContainerConfig) -> Self {
        Self { registry, config }
    }
}

#[async_trait]
impl<T> InstanceInitializer<T> for RegistryInitializer<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    async fn initialize_instance(
        &self,
        namespace: &Namespace,
        _lookup: &CatalogLookup,
    ) -> Result<Arc<T>, ContainerError> {
        let Some(name) = self.config.factory_for(&namespace.name) else {
            return Err(ContainerError::initialization(
                &namespace.name,
                "no instance factory configured",
            ));
        };

        tracing::debug!(namespace = %namespace.name, factory = %name, "Instantiating from registry");
        self.registry.instantiate(name)
    }
}
