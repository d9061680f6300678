//! Version cache: one immutable [`DocGraph`] per `project/branch`.
//!
//! Construction is single-flight. Concurrent first requests for a key share
//! one in-flight future and exactly one graph is retained. Failures are never
//! cached, so the next request retries.

use crate::config::{Config, ProjectConfig};
use crate::doc::{DocGraph, VersionKey};
use crate::error::{DocsError, FetchError};
use crate::source::DocSource;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};

type BuildResult = Result<Arc<DocGraph>, Arc<FetchError>>;

/// Shared construction future, awaited by every concurrent requester.
type SharedBuild = Shared<BoxFuture<'static, BuildResult>>;

pub struct VersionCache {
    config: Arc<Config>,
    source: Arc<dyn DocSource>,

    /// Built graphs, least recently used evicted first
    cache: RwLock<LruCache<VersionKey, Arc<DocGraph>>>,

    /// Constructions in progress
    in_flight: Mutex<HashMap<VersionKey, SharedBuild>>,
}

impl std::fmt::Debug for VersionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionCache")
            .field("capacity", &self.config.cache_capacity)
            .finish_non_exhaustive()
    }
}

impl VersionCache {
    pub fn new(config: Arc<Config>, source: Arc<dyn DocSource>) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            source,
            cache: RwLock::new(LruCache::new(capacity)),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the graph for a version, fetching and building it on first use.
    pub async fn get(&self, project: &str, branch: &str) -> Result<Arc<DocGraph>, DocsError> {
        let project_config = self.config.project(project)?.clone();
        let key = VersionKey::new(project, branch);

        if let Some(graph) = self.get_cached(&key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(graph);
        }

        let build = {
            let mut in_flight = self.in_flight.lock().await;

            // A build may have finished between the cache check and taking the lock.
            if let Some(graph) = self.get_cached(&key).await {
                return Ok(graph);
            }

            if let Some(existing) = in_flight.get(&key) {
                tracing::debug!("Awaiting in-flight build for {}", key);
                existing.clone()
            } else {
                let build = self.start_build(project_config, key.clone());
                in_flight.insert(key.clone(), build.clone());
                build
            }
        };

        let result = build.clone().await;

        // The first awaiter to get here publishes the result and clears the slot.
        {
            let mut in_flight = self.in_flight.lock().await;
            if in_flight
                .get(&key)
                .is_some_and(|current| current.ptr_eq(&build))
            {
                in_flight.remove(&key);
                if let Ok(graph) = &result {
                    self.cache.write().await.put(key.clone(), Arc::clone(graph));
                    tracing::debug!("Cached {}", key);
                }
            }
        }

        result.map_err(|err| {
            if matches!(*err, FetchError::NotFound { .. }) {
                DocsError::VersionNotFound(key)
            } else {
                DocsError::Upstream(err)
            }
        })
    }

    fn start_build(&self, project: ProjectConfig, key: VersionKey) -> SharedBuild {
        let source = Arc::clone(&self.source);
        tracing::info!("Fetching documentation for {}", key);

        let future: BoxFuture<'static, BuildResult> = Box::pin(async move {
            let start = Instant::now();
            let result = match source.fetch(&project, &key).await {
                Ok(docs) => DocGraph::build(project.site(&key), &docs).map(Arc::new),
                Err(err) => Err(err),
            };

            match result {
                Ok(graph) => {
                    tracing::debug!("Fetched and built {} in {:?}", key, start.elapsed());
                    Ok(graph)
                }
                Err(err) => {
                    tracing::warn!("Failed to load documentation for {}: {}", key, err);
                    Err(Arc::new(err))
                }
            }
        });

        future.shared()
    }

    /// Get a cached graph without triggering a fetch.
    pub async fn get_cached(&self, key: &VersionKey) -> Option<Arc<DocGraph>> {
        self.cache.write().await.get(key).cloned()
    }

    /// Drop a cached version so the next request refetches it.
    pub async fn invalidate(&self, key: &VersionKey) -> bool {
        let removed = self.cache.write().await.pop(key).is_some();
        if removed {
            tracing::info!("Invalidated {}", key);
        }
        removed
    }

    /// Number of cached versions.
    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }
}
