//! Domain service for the static catalog plugin.

use std::collections::HashMap;

use catalog_sdk::{
    Cluster, ClusterId, Component, Namespace, NamespaceId, NamespaceServiceClusterMapping, Service,
    ServiceId,
};

use crate::config::StaticCatalogConfig;

/// Static catalog service.
///
/// Stores catalog entities in memory, loaded from configuration.
/// Per-namespace mapping rows and per-service components keep their
/// configuration order.
pub struct StaticCatalogService {
    /// Namespaces by ID.
    pub(super) namespaces: HashMap<NamespaceId, Namespace>,

    /// Namespace IDs by name.
    pub(super) namespace_ids: HashMap<String, NamespaceId>,

    /// Clusters by ID.
    pub(super) clusters: HashMap<ClusterId, Cluster>,

    /// Services by `(cluster_id, name)`.
    pub(super) services: HashMap<(ClusterId, String), Service>,

    /// Components index: `service_id` -> components in configuration order.
    pub(super) components: HashMap<ServiceId, Vec<Component>>,

    /// Mapping index: `namespace_id` -> rows in configuration order.
    pub(super) mappings: HashMap<NamespaceId, Vec<NamespaceServiceClusterMapping>>,
}

impl StaticCatalogService {
    /// Creates a new service from configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticCatalogConfig) -> Self {
        let (namespaces, namespace_ids) = index_namespaces(cfg);
        let clusters = index_clusters(cfg);
        let services = index_services(cfg);

        let mut components: HashMap<ServiceId, Vec<Component>> = HashMap::new();
        for component in &cfg.components {
            components
                .entry(component.service_id)
                .or_default()
                .push(Component::from(component));
        }

        let mut mappings: HashMap<NamespaceId, Vec<NamespaceServiceClusterMapping>> =
            HashMap::new();
        for mapping in &cfg.mappings {
            if !namespaces.contains_key(&mapping.namespace_id) {
                tracing::warn!(
                    namespace_id = mapping.namespace_id,
                    service_name = %mapping.service_name,
                    "Mapping references an undeclared namespace and will never be served"
                );
            }
            mappings
                .entry(mapping.namespace_id)
                .or_default()
                .push(NamespaceServiceClusterMapping::from(mapping));
        }

        tracing::debug!(
            namespaces = namespaces.len(),
            clusters = clusters.len(),
            services = services.len(),
            components = cfg.components.len(),
            mappings = cfg.mappings.len(),
            "Static catalog loaded"
        );

        Self {
            namespaces,
            namespace_ids,
            clusters,
            services,
            components,
            mappings,
        }
    }

    /// Get a namespace by ID.
    #[must_use]
    pub fn namespace(&self, id: NamespaceId) -> Option<&Namespace> {
        self.namespaces.get(&id)
    }

    /// Get a namespace by its name.
    #[must_use]
    pub fn namespace_by_name(&self, name: &str) -> Option<&Namespace> {
        self.namespace_ids
            .get(name)
            .and_then(|id| self.namespaces.get(id))
    }
}

// Duplicate entries keep the first declaration and are reported.

fn index_namespaces(
    cfg: &StaticCatalogConfig,
) -> (HashMap<NamespaceId, Namespace>, HashMap<String, NamespaceId>) {
    let mut namespaces = HashMap::new();
    let mut namespace_ids = HashMap::new();
    for namespace in &cfg.namespaces {
        if namespaces.contains_key(&namespace.id) {
            tracing::warn!(namespace_id = namespace.id, name = %namespace.name, "Duplicate namespace id ignored");
            continue;
        }
        if namespace_ids.contains_key(&namespace.name) {
            tracing::warn!(namespace_id = namespace.id, name = %namespace.name, "Duplicate namespace name ignored");
            continue;
        }
        namespace_ids.insert(namespace.name.clone(), namespace.id);
        namespaces.insert(namespace.id, Namespace::from(namespace));
    }
    (namespaces, namespace_ids)
}

fn index_clusters(cfg: &StaticCatalogConfig) -> HashMap<ClusterId, Cluster> {
    let mut clusters = HashMap::new();
    for cluster in &cfg.clusters {
        if clusters.contains_key(&cluster.id) {
            tracing::warn!(cluster_id = cluster.id, name = %cluster.name, "Duplicate cluster id ignored");
            continue;
        }
        clusters.insert(cluster.id, Cluster::from(cluster));
    }
    clusters
}

fn index_services(cfg: &StaticCatalogConfig) -> HashMap<(ClusterId, String), Service> {
    let mut services = HashMap::new();
    for service in &cfg.services {
        let key = (service.cluster_id, service.name.clone());
        if services.contains_key(&key) {
            tracing::warn!(
                service_id = service.id,
                cluster_id = service.cluster_id,
                name = %service.name,
                "Duplicate service name in cluster ignored"
            );
            continue;
        }
        services.insert(key, Service::from(service));
    }
    services
}
