//! Catalog SDK
//!
//! This crate provides the public boundary of the stream catalog:
//!
//! - [`CatalogClient`] - API trait implemented by catalog backends
//! - [`Namespace`], [`NamespaceServiceClusterMapping`], [`Cluster`], [`Service`],
//!   [`Component`] - Entity models
//! - [`CatalogError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use catalog_sdk::CatalogClient;
//!
//! let mappings = catalog.list_service_cluster_mappings(namespace_id, "KAFKA").await?;
//! let cluster = catalog.get_cluster(cluster_id).await?;
//! let service = catalog.get_service_by_name(cluster_id, "KAFKA").await?;
//! let components = catalog.list_components(service.id).await?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;

pub use api::CatalogClient;
pub use error::CatalogError;
pub use models::{
    Cluster, ClusterId, Component, ComponentId, Namespace, NamespaceId,
    NamespaceServiceClusterMapping, Service, ServiceId,
};
