//! Domain models of the stream catalog.

use serde::{Deserialize, Serialize};

/// Unique identifier for a namespace.
pub type NamespaceId = i64;

/// Unique identifier for a cluster.
pub type ClusterId = i64;

/// Unique identifier for a service.
pub type ServiceId = i64;

/// Unique identifier for a component.
pub type ComponentId = i64;

/// Logical tenant.
///
/// `id` is `None` until the namespace has been stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NamespaceId>,
    pub name: String,
}

impl Namespace {
    /// Creates a stored namespace.
    #[must_use]
    pub fn new(id: NamespaceId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Creates a namespace that has no id yet.
    #[must_use]
    pub fn unsaved(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// Join row binding a service name of a namespace to a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceServiceClusterMapping {
    pub namespace_id: NamespaceId,
    pub service_name: String,
    pub cluster_id: ClusterId,
}

/// Deployment group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: ClusterId,
    pub name: String,
}

/// Named capability (e.g. a message broker) deployed in a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub cluster_id: ClusterId,
    pub name: String,
}

/// Named sub-part of a service (e.g. a broker role) and where it listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub service_id: ServiceId,
    pub name: String,
    #[serde(default)]
    pub hosts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unsaved_namespace_has_no_id() {
        let ns = Namespace::unsaved("staging");
        assert_eq!(ns.id, None);
        assert_eq!(ns.name, "staging");
    }

    #[test]
    fn namespace_without_id_deserializes() {
        let ns: Namespace = serde_json::from_value(json!({ "name": "prod" })).unwrap();
        assert_eq!(ns, Namespace::unsaved("prod"));

        let ns: Namespace = serde_json::from_value(json!({ "id": 7, "name": "prod" })).unwrap();
        assert_eq!(ns, Namespace::new(7, "prod"));
    }

    #[test]
    fn component_defaults_to_no_endpoint() {
        let component: Component = serde_json::from_value(json!({
            "id": 1,
            "service_id": 10,
            "name": "BROKER"
        }))
        .unwrap();

        assert!(component.hosts.is_empty());
        assert_eq!(component.port, None);
        assert_eq!(component.protocol, None);
    }
}
