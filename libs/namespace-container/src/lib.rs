//! Namespace Container
//!
//! Keeps one lazily created instance per namespace (tenant) and provides the
//! catalog lookups initializers need to build those instances: which service
//! clusters a namespace uses, which components a service exposes, and whether
//! a component carries a usable host/port.
//!
//! ## Usage
//!
//! ```ignore
//! let container: NamespaceContainer<dyn Producer> =
//!     NamespaceContainer::new(catalog, Arc::new(ProducerInitializer));
//!
//! let producer = container.find_instance(&namespace).await?;
//! // ... later, when the namespace's catalog entries change
//! container.invalidate_instance(namespace_id).await;
//! ```
//!
//! Instances can also be built by name from an [`InstanceRegistry`] chosen
//! per namespace through [`ContainerConfig`], see [`RegistryInitializer`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod container;
pub mod error;
pub mod lookup;
pub mod registry;
pub mod validation;

pub use config::{ConfigError, ContainerConfig};
pub use container::{InstanceInitializer, NamespaceContainer};
pub use error::ContainerError;
pub use lookup::{CatalogLookup, ComponentEndpoint};
pub use registry::{InstanceFactory, InstanceRegistry, RegistryInitializer};
pub use validation::{assert_host_and_port, assert_hosts_and_port, require_hosts_and_port};
