//! Static Catalog Plugin
//!
//! This plugin serves namespaces, clusters, services and components from
//! configuration. Useful for testing, development, and simple deployments.
//!
//! ## Configuration
//!
//! ```yaml
//! namespaces:
//!   - id: 7
//!     name: "production"
//! clusters:
//!   - id: 1
//!     name: "east"
//! services:
//!   - id: 10
//!     cluster_id: 1
//!     name: "KAFKA"
//! components:
//!   - id: 100
//!     service_id: 10
//!     name: "BROKER"
//!     hosts: ["kafka-1.east", "kafka-2.east"]
//!     port: 9092
//! mappings:
//!   - namespace_id: 7
//!     service_name: "KAFKA"
//!     cluster_id: 1
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::StaticCatalogConfig;
pub use domain::StaticCatalogService;
