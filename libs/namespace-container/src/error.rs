//! Errors reported by the namespace container and its lookup helpers.

use catalog_sdk::{CatalogError, ClusterId, NamespaceId};
use thiserror::Error;

/// Configuration or resolution failure.
///
/// Every variant renders a human-readable message naming the entity that
/// could not be resolved.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The caller passed an argument the container cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The catalog has no mapping list for the service in this namespace.
    #[error("Service name {service_name} is not set in namespace {namespace_name}({namespace_id})")]
    ServiceNotConfigured {
        service_name: String,
        namespace_name: String,
        namespace_id: NamespaceId,
    },

    /// A mapping row points at a cluster the catalog does not know.
    #[error("Cluster {cluster_id} is not found")]
    ClusterNotFound { cluster_id: ClusterId },

    /// The cluster exists but has no service with that name.
    #[error("Service name {service_name} is not found in Cluster {cluster_id}")]
    ServiceNotFoundInCluster {
        service_name: String,
        cluster_id: ClusterId,
    },

    #[error("{service_name} doesn't have {component_name} as component")]
    ComponentNotFound {
        service_name: String,
        component_name: String,
    },

    /// Host or port information is missing for a component.
    #[error("{component_name} component doesn't have enough information - {detail}")]
    IncompleteHostPort {
        component_name: String,
        detail: String,
    },

    /// No factory is registered under the requested name.
    #[error("instance factory not found: {name}")]
    FactoryNotFound { name: String },

    /// The factory exists but is not allowed by configuration.
    #[error("instance factory not allowed: {name}")]
    FactoryAccessDenied { name: String },

    /// The factory ran and failed.
    #[error("instance factory {name} failed to construct instance: {source}")]
    ConstructionFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The initializer could not produce an instance for the namespace.
    #[error("failed to initialize instance for namespace {namespace}: {reason}")]
    Initialization { namespace: String, reason: String },

    /// The catalog backend failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl ContainerError {
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    #[must_use]
    pub fn initialization(namespace: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Initialization {
            namespace: namespace.into(),
            reason: reason.into(),
        }
    }
}
