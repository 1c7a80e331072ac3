//! Catalog lookup helpers.
//!
//! Thin query layer over an injected [`CatalogClient`] that resolves the
//! services a namespace is bound to and the components of a service. None of
//! these helpers touch the instance cache.

use std::sync::Arc;

use catalog_sdk::{CatalogClient, Component, Namespace, Service};

use crate::error::ContainerError;
use crate::validation::require_hosts_and_port;

/// Validated network location of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEndpoint {
    pub hosts: Vec<String>,
    pub port: u16,
    pub protocol: Option<String>,
}

impl ComponentEndpoint {
    /// `host:port` for every host, in catalog order.
    #[must_use]
    pub fn addresses(&self) -> Vec<String> {
        self.hosts
            .iter()
            .map(|h| format!("{h}:{}", self.port))
            .collect()
    }
}

/// Query helpers over a shared catalog handle.
#[derive(Clone)]
pub struct CatalogLookup {
    catalog: Arc<dyn CatalogClient>,
}

impl CatalogLookup {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self { catalog }
    }

    /// The underlying catalog handle.
    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn CatalogClient> {
        &self.catalog
    }

    /// Resolve every service named `service_name` bound to the namespace.
    ///
    /// Returns one service per mapping row, in the order the catalog lists
    /// the rows. An empty result is valid.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the namespace has no id
    /// - `ServiceNotConfigured` if the catalog has no mapping list for the namespace
    /// - `ClusterNotFound` if a mapping points at an unknown cluster
    /// - `ServiceNotFoundInCluster` if a mapped cluster lacks the service
    /// - `Catalog` if the catalog backend fails
    #[tracing::instrument(skip_all, fields(namespace = %namespace.name, service_name = %service_name))]
    pub async fn services_for_namespace(
        &self,
        namespace: &Namespace,
        service_name: &str,
    ) -> Result<Vec<Service>, ContainerError> {
        let namespace_id = namespace.id.ok_or_else(|| {
            ContainerError::invalid_argument(format!("namespace {} has no id", namespace.name))
        })?;

        let mappings = self
            .catalog
            .list_service_cluster_mappings(namespace_id, service_name)
            .await?
            .ok_or_else(|| ContainerError::ServiceNotConfigured {
                service_name: service_name.to_owned(),
                namespace_name: namespace.name.clone(),
                namespace_id,
            })?;

        let mut services = Vec::with_capacity(mappings.len());
        for mapping in &mappings {
            let cluster_id = mapping.cluster_id;
            if self.catalog.get_cluster(cluster_id).await?.is_none() {
                return Err(ContainerError::ClusterNotFound { cluster_id });
            }

            let service = self
                .catalog
                .get_service_by_name(cluster_id, service_name)
                .await?
                .ok_or_else(|| ContainerError::ServiceNotFoundInCluster {
                    service_name: service_name.to_owned(),
                    cluster_id,
                })?;

            services.push(service);
        }

        tracing::debug!(count = services.len(), "Resolved services for namespace");
        Ok(services)
    }

    /// First service of [`Self::services_for_namespace`], or `None` when the
    /// namespace has no mapping row for it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::services_for_namespace`].
    pub async fn first_service_for_namespace(
        &self,
        namespace: &Namespace,
        service_name: &str,
    ) -> Result<Option<Service>, ContainerError> {
        Ok(self
            .services_for_namespace(namespace, service_name)
            .await?
            .into_iter()
            .next())
    }

    /// First component of the service whose name equals `component_name`.
    ///
    /// # Errors
    ///
    /// - `ComponentNotFound` if the service has no such component
    /// - `Catalog` if the catalog backend fails
    pub async fn component(
        &self,
        service: &Service,
        component_name: &str,
    ) -> Result<Component, ContainerError> {
        self.catalog
            .list_components(service.id)
            .await?
            .into_iter()
            .find(|c| c.name == component_name)
            .ok_or_else(|| ContainerError::ComponentNotFound {
                service_name: service.name.clone(),
                component_name: component_name.to_owned(),
            })
    }

    /// Resolve a component and check that it carries hosts and a port.
    ///
    /// # Errors
    ///
    /// - `ComponentNotFound` if the service has no such component
    /// - `IncompleteHostPort` if hosts or port are missing
    /// - `Catalog` if the catalog backend fails
    pub async fn component_endpoint(
        &self,
        service: &Service,
        component_name: &str,
    ) -> Result<ComponentEndpoint, ContainerError> {
        let component = self.component(service, component_name).await?;
        let port = require_hosts_and_port(
            &component.name,
            Some(component.hosts.as_slice()),
            component.port,
        )?;

        Ok(ComponentEndpoint {
            hosts: component.hosts,
            port,
            protocol: component.protocol,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog_sdk::{
        CatalogError, Cluster, ClusterId, NamespaceId, NamespaceServiceClusterMapping, ServiceId,
    };
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory catalog whose mapping list can be absent, empty or populated.
    #[derive(Default)]
    struct MockCatalog {
        mappings: Option<Vec<NamespaceServiceClusterMapping>>,
        clusters: HashMap<ClusterId, Cluster>,
        services: HashMap<ClusterId, Service>,
        components: HashMap<ServiceId, Vec<Component>>,
        fail_components: bool,
        component_calls: AtomicUsize,
    }

    impl MockCatalog {
        fn with_cluster(mut self, id: ClusterId, service_id: ServiceId) -> Self {
            self.clusters.insert(
                id,
                Cluster {
                    id,
                    name: format!("cluster-{id}"),
                },
            );
            self.services.insert(
                id,
                Service {
                    id: service_id,
                    cluster_id: id,
                    name: "KAFKA".to_owned(),
                },
            );
            self
        }

        fn with_mappings(mut self, cluster_ids: &[ClusterId]) -> Self {
            self.mappings = Some(
                cluster_ids
                    .iter()
                    .map(|&cluster_id| NamespaceServiceClusterMapping {
                        namespace_id: 7,
                        service_name: "KAFKA".to_owned(),
                        cluster_id,
                    })
                    .collect(),
            );
            self
        }
    }

    #[async_trait]
    impl CatalogClient for MockCatalog {
        async fn list_service_cluster_mappings(
            &self,
            _namespace_id: NamespaceId,
            _service_name: &str,
        ) -> Result<Option<Vec<NamespaceServiceClusterMapping>>, CatalogError> {
            Ok(self.mappings.clone())
        }

        async fn get_cluster(
            &self,
            cluster_id: ClusterId,
        ) -> Result<Option<Cluster>, CatalogError> {
            Ok(self.clusters.get(&cluster_id).cloned())
        }

        async fn get_service_by_name(
            &self,
            cluster_id: ClusterId,
            service_name: &str,
        ) -> Result<Option<Service>, CatalogError> {
            Ok(self
                .services
                .get(&cluster_id)
                .filter(|s| s.name == service_name)
                .cloned())
        }

        async fn list_components(
            &self,
            service_id: ServiceId,
        ) -> Result<Vec<Component>, CatalogError> {
            self.component_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_components {
                return Err(CatalogError::unavailable("catalog is down"));
            }
            Ok(self
                .components
                .get(&service_id)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn kafka_service() -> Service {
        Service {
            id: 10,
            cluster_id: 1,
            name: "KAFKA".to_owned(),
        }
    }

    fn component(id: i64, name: &str, hosts: &[&str], port: Option<u16>) -> Component {
        Component {
            id,
            service_id: 10,
            name: name.to_owned(),
            hosts: hosts.iter().map(|h| (*h).to_owned()).collect(),
            protocol: None,
            port,
        }
    }

    fn lookup(catalog: MockCatalog) -> CatalogLookup {
        CatalogLookup::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn services_resolved_in_mapping_order() {
        let catalog = MockCatalog::default()
            .with_cluster(1, 10)
            .with_cluster(2, 20)
            .with_mappings(&[1, 2]);
        let lookup = lookup(catalog);
        let ns = Namespace::new(7, "production");

        let services = lookup.services_for_namespace(&ns, "KAFKA").await.unwrap();
        let ids: Vec<ServiceId> = services.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![10, 20]);

        let first = lookup
            .first_service_for_namespace(&ns, "KAFKA")
            .await
            .unwrap();
        assert_eq!(first.map(|s| s.cluster_id), Some(1));
    }

    #[tokio::test]
    async fn absent_mapping_list_is_not_configured() {
        let lookup = lookup(MockCatalog::default());
        let ns = Namespace::new(7, "production");

        let err = lookup
            .services_for_namespace(&ns, "STORM")
            .await
            .unwrap_err();
        assert!(matches!(err, ContainerError::ServiceNotConfigured { .. }));
        assert!(err.to_string().contains("not set in namespace"));
    }

    #[tokio::test]
    async fn empty_mapping_list_is_valid() {
        let lookup = lookup(MockCatalog::default().with_mappings(&[]));
        let ns = Namespace::new(7, "production");

        let services = lookup.services_for_namespace(&ns, "KAFKA").await.unwrap();
        assert!(services.is_empty());

        let first = lookup
            .first_service_for_namespace(&ns, "KAFKA")
            .await
            .unwrap();
        assert!(first.is_none());
    }

    #[tokio::test]
    async fn missing_cluster_is_reported() {
        let catalog = MockCatalog::default().with_cluster(1, 10).with_mappings(&[1, 2]);
        let lookup = lookup(catalog);

        let err = lookup
            .services_for_namespace(&Namespace::new(7, "production"), "KAFKA")
            .await
            .unwrap_err();
        assert!(matches!(err, ContainerError::ClusterNotFound { cluster_id: 2 }));
        assert_eq!(err.to_string(), "Cluster 2 is not found");
    }

    #[tokio::test]
    async fn missing_service_in_cluster_is_reported() {
        let mut catalog = MockCatalog::default().with_cluster(1, 10).with_mappings(&[1]);
        catalog.services.clear();
        let lookup = lookup(catalog);

        let err = lookup
            .services_for_namespace(&Namespace::new(7, "production"), "KAFKA")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContainerError::ServiceNotFoundInCluster { cluster_id: 1, .. }
        ));
        assert_eq!(
            err.to_string(),
            "Service name KAFKA is not found in Cluster 1"
        );
    }

    #[tokio::test]
    async fn namespace_without_id_is_rejected() {
        let lookup = lookup(MockCatalog::default().with_mappings(&[]));

        let err = lookup
            .services_for_namespace(&Namespace::unsaved("draft"), "KAFKA")
            .await
            .unwrap_err();
        assert!(matches!(err, ContainerError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn component_by_exact_name() {
        let mut catalog = MockCatalog::default();
        catalog.components.insert(
            10,
            vec![
                component(1, "BROKER", &["b1"], Some(9092)),
                component(2, "ZK", &["z1"], Some(2181)),
                component(3, "BROKER", &["b2"], Some(9093)),
            ],
        );
        let lookup = lookup(catalog);
        let service = kafka_service();

        let broker = lookup.component(&service, "BROKER").await.unwrap();
        assert_eq!(broker.id, 1, "first match wins");

        let err = lookup.component(&service, "NIMBUS").await.unwrap_err();
        assert!(matches!(err, ContainerError::ComponentNotFound { .. }));
        assert!(err.to_string().contains("doesn't have NIMBUS"));

        assert!(lookup.component(&service, "broker").await.is_err());
    }

    #[tokio::test]
    async fn component_endpoint_requires_hosts_and_port() {
        let mut catalog = MockCatalog::default();
        catalog.components.insert(
            10,
            vec![
                component(1, "BROKER", &["b1", "b2"], Some(9092)),
                component(2, "ZK", &[], Some(2181)),
                component(3, "NIMBUS", &["n1"], None),
            ],
        );
        let lookup = lookup(catalog);
        let service = kafka_service();

        let endpoint = lookup.component_endpoint(&service, "BROKER").await.unwrap();
        assert_eq!(endpoint.port, 9092);
        assert_eq!(endpoint.addresses(), vec!["b1:9092", "b2:9092"]);

        let err = lookup.component_endpoint(&service, "ZK").await.unwrap_err();
        assert!(matches!(err, ContainerError::IncompleteHostPort { .. }));

        let err = lookup
            .component_endpoint(&service, "NIMBUS")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("port: null"));
    }

    #[tokio::test]
    async fn catalog_failures_propagate() {
        let catalog = MockCatalog {
            fail_components: true,
            ..MockCatalog::default()
        };
        let catalog = Arc::new(catalog);
        let lookup = CatalogLookup::new(catalog.clone());

        let err = lookup
            .component(&kafka_service(), "BROKER")
            .await
            .unwrap_err();
        assert!(matches!(err, ContainerError::Catalog(_)));
        assert_eq!(
            catalog.component_calls.load(Ordering::SeqCst),
            1,
            "errors are not retried"
        );
    }
}
