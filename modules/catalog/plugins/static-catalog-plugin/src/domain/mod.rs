//! Domain layer for the static catalog plugin.

pub mod client;
pub mod service;

pub use service::StaticCatalogService;
