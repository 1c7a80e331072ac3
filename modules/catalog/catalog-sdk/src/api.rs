//! Client trait for the stream catalog.
//!
//! Backends implement this trait; consumers hold it as
//! `Arc<dyn CatalogClient>` and share it across tasks.

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::models::{
    Cluster, ClusterId, Component, NamespaceId, NamespaceServiceClusterMapping, Service, ServiceId,
};

/// Read-only view of the catalog used to resolve per-namespace services.
///
/// Implementations must be safe for concurrent use.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// List the service-to-cluster mappings of a namespace for one service name.
    ///
    /// Returns `Ok(None)` when the catalog has no mapping list for the
    /// namespace at all, and `Ok(Some(vec![]))` when the namespace is known
    /// but has no row for `service_name`. Callers rely on that distinction.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backend fails.
    async fn list_service_cluster_mappings(
        &self,
        namespace_id: NamespaceId,
        service_name: &str,
    ) -> Result<Option<Vec<NamespaceServiceClusterMapping>>, CatalogError>;

    /// Get a cluster by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backend fails.
    async fn get_cluster(&self, cluster_id: ClusterId) -> Result<Option<Cluster>, CatalogError>;

    /// Get the service named `service_name` deployed in the cluster.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backend fails.
    async fn get_service_by_name(
        &self,
        cluster_id: ClusterId,
        service_name: &str,
    ) -> Result<Option<Service>, CatalogError>;

    /// List every component of a service, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backend fails.
    async fn list_components(&self, service_id: ServiceId) -> Result<Vec<Component>, CatalogError>;
}
