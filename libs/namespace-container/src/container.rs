//! Per-namespace instance container.
//!
//! Holds at most one instance per namespace id, created lazily on first
//! lookup by an injected [`InstanceInitializer`] and kept until explicitly
//! invalidated.
//!
//! Implementation details:
//! - Instances live in a sync `RwLock<HashMap<..>>`; the hit path takes only
//!   the read lock and never awaits.
//! - Each namespace id has its own async latch. A miss acquires the latch,
//!   re-checks the map and only then runs the initializer, so concurrent
//!   first lookups for one id initialize it once while other ids proceed.
//! - Invalidation takes the same latch: an invalidation racing an in-flight
//!   initialization removes the instance that initialization publishes.
//!   `clear` takes every latch that exists at the time of the call.
//! - A latch lives only while some caller holds or waits on it, so the latch
//!   table stays bounded by the number of in-flight operations.
//! - The container never disposes of instances. `invalidate_instance` returns
//!   the removed `Arc` to the caller.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use catalog_sdk::{CatalogClient, Namespace, NamespaceId};
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::ContainerError;
use crate::lookup::CatalogLookup;

/// Strategy that builds the instance of a namespace.
///
/// Called at most once per namespace id between invalidations. A failure is
/// returned to the caller of [`NamespaceContainer::find_instance`] and leaves
/// no binding behind, so the next lookup tries again.
#[async_trait]
pub trait InstanceInitializer<T>: Send + Sync
where
    T: ?Sized + Send + Sync + 'static,
{
    /// Build the instance for `namespace`.
    ///
    /// # Errors
    ///
    /// Any `ContainerError`; lookup failures from `lookup` propagate as-is.
    async fn initialize_instance(
        &self,
        namespace: &Namespace,
        lookup: &CatalogLookup,
    ) -> Result<Arc<T>, ContainerError>;
}

/// Lazily populated map from namespace id to a shared instance of `T`.
pub struct NamespaceContainer<T: ?Sized> {
    lookup: CatalogLookup,
    initializer: Arc<dyn InstanceInitializer<T>>,
    instances: RwLock<HashMap<NamespaceId, Arc<T>>>,
    latches: DashMap<NamespaceId, Arc<Mutex<()>>>,
}

impl<T> NamespaceContainer<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        initializer: Arc<dyn InstanceInitializer<T>>,
    ) -> Self {
        Self {
            lookup: CatalogLookup::new(catalog),
            initializer,
            instances: RwLock::new(HashMap::new()),
            latches: DashMap::new(),
        }
    }

    /// Lookup helpers over the container's catalog.
    #[must_use]
    pub fn lookup(&self) -> &CatalogLookup {
        &self.lookup
    }

    /// Return the instance bound to the namespace, initializing it on first use.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the namespace has no id
    /// - Whatever the initializer returns; no binding is installed in that case
    #[tracing::instrument(skip_all, fields(namespace = %namespace.name, namespace_id = ?namespace.id))]
    pub async fn find_instance(&self, namespace: &Namespace) -> Result<Arc<T>, ContainerError> {
        let namespace_id = namespace.id.ok_or_else(|| {
            ContainerError::invalid_argument(format!("namespace {} has no id", namespace.name))
        })?;

        if let Some(instance) = self.cached(namespace_id) {
            tracing::debug!("Instance cache hit");
            return Ok(instance);
        }

        let lease = self.lease(namespace_id);
        let _init_guard = lease.latch.lock().await;

        // Another caller may have initialized while we waited on the latch.
        if let Some(instance) = self.cached(namespace_id) {
            tracing::debug!("Instance initialized by a concurrent caller");
            return Ok(instance);
        }

        info!("Initializing instance for namespace");
        let instance = self
            .initializer
            .initialize_instance(namespace, &self.lookup)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Instance initialization failed"))?;

        self.instances
            .write()
            .insert(namespace_id, Arc::clone(&instance));

        Ok(instance)
    }

    /// Drop the binding for `namespace_id`, returning the removed instance.
    ///
    /// Waits for an in-flight initialization of the same id to finish first.
    /// Returns `None` if nothing was bound.
    #[tracing::instrument(skip(self))]
    pub async fn invalidate_instance(&self, namespace_id: NamespaceId) -> Option<Arc<T>> {
        let lease = self.existing_lease(namespace_id);
        let _init_guard = match &lease {
            Some(lease) => Some(lease.latch.lock().await),
            None => None,
        };

        let removed = self.instances.write().remove(&namespace_id);
        if removed.is_some() {
            info!("Instance invalidated");
        }
        removed
    }

    /// Whether an instance is currently bound to `namespace_id`.
    #[must_use]
    pub fn contains(&self, namespace_id: NamespaceId) -> bool {
        self.instances.read().contains_key(&namespace_id)
    }

    /// Number of bound instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }

    /// Drop every binding.
    ///
    /// Waits for initializations already in flight, so nothing they produce
    /// survives the clear. Lookups that start afterwards initialize afresh.
    pub async fn clear(&self) {
        let mut namespace_ids: Vec<NamespaceId> =
            self.latches.iter().map(|entry| *entry.key()).collect();
        // Fixed order so concurrent clears cannot deadlock on each other.
        namespace_ids.sort_unstable();

        let leases: Vec<LatchLease<'_>> = namespace_ids
            .into_iter()
            .filter_map(|namespace_id| self.existing_lease(namespace_id))
            .collect();
        let mut guards = Vec::with_capacity(leases.len());
        for lease in &leases {
            guards.push(lease.latch.lock().await);
        }

        let mut instances = self.instances.write();
        info!(count = instances.len(), "Clearing namespace instances");
        instances.clear();
    }

    fn cached(&self, namespace_id: NamespaceId) -> Option<Arc<T>> {
        self.instances.read().get(&namespace_id).cloned()
    }

    fn lease(&self, namespace_id: NamespaceId) -> LatchLease<'_> {
        let latch = Arc::clone(self.latches.entry(namespace_id).or_default().value());
        LatchLease {
            latches: &self.latches,
            namespace_id,
            latch,
        }
    }

    fn existing_lease(&self, namespace_id: NamespaceId) -> Option<LatchLease<'_>> {
        let latch = Arc::clone(self.latches.get(&namespace_id)?.value());
        Some(LatchLease {
            latches: &self.latches,
            namespace_id,
            latch,
        })
    }
}

/// Holds a namespace latch; drops the table entry when the last holder leaves.
///
/// Declare lock guards after the lease so they are released first.
struct LatchLease<'a> {
    latches: &'a DashMap<NamespaceId, Arc<Mutex<()>>>,
    namespace_id: NamespaceId,
    latch: Arc<Mutex<()>>,
}

impl Drop for LatchLease<'_> {
    fn drop(&mut self) {
        // Table entry plus this lease: nobody else holds or waits on it.
        self.latches.remove_if(&self.namespace_id, |_, latch| {
            Arc::ptr_eq(latch, &self.latch) && Arc::strong_count(latch) == 2
        });
    }
}
