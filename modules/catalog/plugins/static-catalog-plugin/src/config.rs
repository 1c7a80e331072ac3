//! Configuration for the static catalog plugin.

use catalog_sdk::{
    Cluster, ClusterId, Component, ComponentId, Namespace, NamespaceId,
    NamespaceServiceClusterMapping, Service, ServiceId,
};
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticCatalogConfig {
    /// Namespaces known to the catalog.
    ///
    /// Mapping lookups for a namespace id not listed here yield no mapping
    /// list at all (as opposed to an empty one).
    pub namespaces: Vec<NamespaceConfig>,

    /// Cluster definitions.
    pub clusters: Vec<ClusterConfig>,

    /// Service definitions.
    pub services: Vec<ServiceConfig>,

    /// Component definitions.
    pub components: Vec<ComponentConfig>,

    /// Namespace to cluster bindings, per service name.
    pub mappings: Vec<MappingConfig>,
}

/// Configuration for a single namespace.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceConfig {
    pub id: NamespaceId,
    pub name: String,
}

/// Configuration for a single cluster.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfig {
    pub id: ClusterId,
    pub name: String,
}

/// Configuration for a single service.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub id: ServiceId,
    pub cluster_id: ClusterId,
    pub name: String,
}

/// Configuration for a single component.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
    pub id: ComponentId,
    pub service_id: ServiceId,
    pub name: String,

    /// Hosts the component listens on.
    #[serde(default)]
    pub hosts: Vec<String>,

    #[serde(default)]
    pub protocol: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,
}

/// Configuration for a single namespace/service/cluster binding.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingConfig {
    pub namespace_id: NamespaceId,
    pub service_name: String,
    pub cluster_id: ClusterId,
}

impl From<&NamespaceConfig> for Namespace {
    fn from(cfg: &NamespaceConfig) -> Self {
        Namespace::new(cfg.id, cfg.name.clone())
    }
}

impl From<&ClusterConfig> for Cluster {
    fn from(cfg: &ClusterConfig) -> Self {
        Self {
            id: cfg.id,
            name: cfg.name.clone(),
        }
    }
}

impl From<&ServiceConfig> for Service {
    fn from(cfg: &ServiceConfig) -> Self {
        Self {
            id: cfg.id,
            cluster_id: cfg.cluster_id,
            name: cfg.name.clone(),
        }
    }
}

impl From<&ComponentConfig> for Component {
    fn from(cfg: &ComponentConfig) -> Self {
        Self {
            id: cfg.id,
            service_id: cfg.service_id,
            name: cfg.name.clone(),
            hosts: cfg.hosts.clone(),
            protocol: cfg.protocol.clone(),
            port: cfg.port,
        }
    }
}

impl From<&MappingConfig> for NamespaceServiceClusterMapping {
    fn from(cfg: &MappingConfig) -> Self {
        Self {
            namespace_id: cfg.namespace_id,
            service_name: cfg.service_name.clone(),
            cluster_id: cfg.cluster_id,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_is_empty() {
        let config = StaticCatalogConfig::default();
        assert!(config.namespaces.is_empty());
        assert!(config.clusters.is_empty());
        assert!(config.services.is_empty());
        assert!(config.components.is_empty());
        assert!(config.mappings.is_empty());
    }

    #[test]
    fn test_config_parse_full_catalog() {
        let yaml = r#"
namespaces:
  - id: 7
    name: "production"
clusters:
  - id: 1
    name: "east"
services:
  - id: 10
    cluster_id: 1
    name: "KAFKA"
components:
  - id: 100
    service_id: 10
    name: "BROKER"
    hosts: ["kafka-1", "kafka-2"]
    protocol: "PLAINTEXT"
    port: 9092
  - id: 101
    service_id: 10
    name: "ZOOKEEPER"
mappings:
  - namespace_id: 7
    service_name: "KAFKA"
    cluster_id: 1
"#;
        let config: StaticCatalogConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.namespaces.len(), 1);
        assert_eq!(config.components.len(), 2);

        let broker = Component::from(&config.components[0]);
        assert_eq!(broker.hosts, vec!["kafka-1", "kafka-2"]);
        assert_eq!(broker.port, Some(9092));
        assert_eq!(broker.protocol.as_deref(), Some("PLAINTEXT"));

        let zk = Component::from(&config.components[1]);
        assert!(zk.hosts.is_empty(), "hosts should default to empty");
        assert_eq!(zk.port, None);
    }

    #[test]
    fn test_config_reject_unknown_fields() {
        let yaml = r#"
clusters:
  - id: 1
    name: "east"
    region: "us-east-1"
"#;
        let result: Result<StaticCatalogConfig, _> = serde_saphyr::from_str(yaml);
        assert!(
            result.is_err(),
            "Config should reject unknown fields due to deny_unknown_fields"
        );
    }
}
