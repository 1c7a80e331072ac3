//! Client implementation for the static catalog plugin.
//!
//! Implements `CatalogClient` using the domain service.

use async_trait::async_trait;
use catalog_sdk::{
    CatalogClient, CatalogError, Cluster, ClusterId, Component, NamespaceId,
    NamespaceServiceClusterMapping, Service, ServiceId,
};

use super::service::StaticCatalogService;

#[async_trait]
impl CatalogClient for StaticCatalogService {
    async fn list_service_cluster_mappings(
        &self,
        namespace_id: NamespaceId,
        service_name: &str,
    ) -> Result<Option<Vec<NamespaceServiceClusterMapping>>, CatalogError> {
        if !self.namespaces.contains_key(&namespace_id) {
            return Ok(None);
        }

        let rows = self
            .mappings
            .get(&namespace_id)
            .map(|rows| {
                rows.iter()
                    .filter(|m| m.service_name == service_name)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(Some(rows))
    }

    async fn get_cluster(&self, cluster_id: ClusterId) -> Result<Option<Cluster>, CatalogError> {
        Ok(self.clusters.get(&cluster_id).cloned())
    }

    async fn get_service_by_name(
        &self,
        cluster_id: ClusterId,
        service_name: &str,
    ) -> Result<Option<Service>, CatalogError> {
        Ok(self
            .services
            .get(&(cluster_id, service_name.to_owned()))
            .cloned())
    }

    async fn list_components(&self, service_id: ServiceId) -> Result<Vec<Component>, CatalogError> {
        Ok(self
            .components
            .get(&service_id)
            .cloned()
            .unwrap_or_default())
    }
}
